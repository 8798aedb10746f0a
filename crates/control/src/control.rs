use std::collections::BTreeSet;

use craftris_common::{Coord, CubeId, Transform, Transformation};
use craftris_grid::{Grid, GridElement, GridError};
use glam::{Quat, Vec3};

use crate::fragment::Fragment;

/// A fragment cube that would land on an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// The fragment cube.
    pub cube: CubeId,
    /// Cell it would occupy.
    pub coord: Coord,
    /// Cube already placed there.
    pub occupant: CubeId,
}

/// Errors from fragment control operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    #[error("no active fragment")]
    NoFragment,
    #[error("move blocked at {} cell(s)", .0.len())]
    Collision(Vec<Coord>),
    #[error("two fragment cubes snap to {0}")]
    Overlap(Coord),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Drives the active fragment against a grid it does not own.
///
/// The container transform carries translation and the view rotation; the
/// fragment's own transform carries piece rotation. A cube's world position
/// is container * fragment * cube.
#[derive(Debug, Clone, Default)]
pub struct Control {
    container: Transform,
    fragment: Option<Fragment>,
    segment: u8,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active fragment.
    pub fn set_fragment(&mut self, fragment: Fragment) {
        self.fragment = Some(fragment);
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    pub fn container(&self) -> &Transform {
        &self.container
    }

    /// Current view segment, 0..4.
    pub fn segment(&self) -> u8 {
        self.segment
    }

    /// Container back to identity at `position`, view segment back to 0.
    pub fn place_at(&mut self, position: Vec3) {
        self.container = Transform::from_position(position);
        self.segment = 0;
    }

    pub fn reset(&mut self) {
        self.place_at(Vec3::ZERO);
    }

    /// Commit a transformation without checking the grid.
    pub fn move_by(&mut self, transformation: &Transformation) -> Result<(), ControlError> {
        let fragment = self.fragment.as_mut().ok_or(ControlError::NoFragment)?;
        apply(&mut self.container, fragment, transformation);
        Ok(())
    }

    /// Cubes that would collide if `transformation` were applied.
    ///
    /// Both transforms are snapshotted, the candidate is applied, the grid is
    /// queried and the snapshots are restored, so the committed state is
    /// unchanged whatever the result.
    pub fn check_collisions(
        &mut self,
        grid: &Grid,
        transformation: &Transformation,
    ) -> Result<Vec<Collision>, ControlError> {
        let fragment = self.fragment.as_mut().ok_or(ControlError::NoFragment)?;
        let saved_container = self.container.snapshot();
        let saved_fragment = fragment.transform.snapshot();

        apply(&mut self.container, fragment, transformation);
        let collisions: Vec<Collision> = world_cells(&self.container, fragment)
            .into_iter()
            .filter_map(|(cube, coord)| {
                grid.pull(coord).map(|element| Collision {
                    cube,
                    coord,
                    occupant: element.id(),
                })
            })
            .collect();

        self.container.restore(&saved_container);
        fragment.transform.restore(&saved_fragment);

        tracing::trace!(?transformation, collisions = collisions.len(), "collision check");
        Ok(collisions)
    }

    /// Apply `transformation` only if it collides with nothing.
    pub fn try_move(
        &mut self,
        grid: &Grid,
        transformation: &Transformation,
    ) -> Result<(), ControlError> {
        let collisions = self.check_collisions(grid, transformation)?;
        if !collisions.is_empty() {
            return Err(ControlError::Collision(
                collisions.into_iter().map(|c| c.coord).collect(),
            ));
        }
        self.move_by(transformation)
    }

    /// Turn the view around Y. The fragment is counter-rotated so its cubes
    /// keep their world positions while later translations follow the view.
    pub fn rotate_perspective(&mut self, degrees: f32) {
        let angle = degrees.to_radians();
        self.container.rotate_local(Quat::from_rotation_y(angle));
        if let Some(fragment) = self.fragment.as_mut() {
            fragment
                .transform
                .rotate_in_parent(Quat::from_rotation_y(-angle));
        }
    }

    /// Step the view by quarter turns until `segment` (mod 4) is reached.
    pub fn rotate_to_segment(&mut self, segment: u8) {
        let segment = segment % 4;
        while self.segment != segment {
            self.rotate_perspective(-90.0);
            self.segment = (self.segment + 1) % 4;
        }
    }

    /// Snapped world cells of the fragment's cubes.
    pub fn cube_positions(&self) -> Vec<Coord> {
        self.fragment
            .as_ref()
            .map(|f| {
                world_cells(&self.container, f)
                    .into_iter()
                    .map(|(_, c)| c)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True if any fragment cube has an occupied face neighbor.
    pub fn is_connected(&self, grid: &Grid) -> bool {
        self.cube_positions()
            .into_iter()
            .any(|c| !grid.find_neighbors(c).is_empty())
    }

    /// Settle the fragment: every cube is snapped to its cell and pushed into
    /// the grid. All cells are validated first, so on error neither the grid
    /// nor the fragment changes. Returns the cells that were filled.
    pub fn drop_fragment(&mut self, grid: &mut Grid) -> Result<Vec<Coord>, ControlError> {
        let _span = tracing::info_span!("drop_fragment").entered();
        let fragment = self.fragment.as_mut().ok_or(ControlError::NoFragment)?;
        let cells: Vec<Coord> = world_cells(&self.container, fragment)
            .into_iter()
            .map(|(_, c)| c)
            .collect();

        let mut seen = BTreeSet::new();
        for &coord in &cells {
            if grid.is_occupied(coord) {
                return Err(GridError::Occupied(coord).into());
            }
            if !seen.insert(coord) {
                return Err(ControlError::Overlap(coord));
            }
        }

        for (mut cube, &coord) in fragment.take_cubes().into_iter().zip(&cells) {
            cube.local = Transform::from_position(coord.to_world());
            grid.push(coord, GridElement::new(cube))?;
        }
        self.fragment = None;

        tracing::debug!(cells = cells.len(), "fragment settled");
        Ok(cells)
    }
}

fn apply(container: &mut Transform, fragment: &mut Fragment, transformation: &Transformation) {
    fragment
        .transform
        .rotate_in_parent(transformation.rotation_quat());
    container.translate_local(transformation.translation);
}

fn world_cells(container: &Transform, fragment: &Fragment) -> Vec<(CubeId, Coord)> {
    let parent = container.matrix() * fragment.transform.matrix();
    fragment
        .cubes()
        .iter()
        .map(|cube| {
            let world = (parent * cube.local.matrix()).transform_point3(Vec3::ZERO);
            (cube.id, Coord::snap(world))
        })
        .collect()
}
