use craftris_common::{Coord, CubeType, Transform, Transformation};
use craftris_grid::{Combo, Combos, Cube, Grid, GridElement, GridError};
use craftris_input::{Action, Bindings, Key};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::control::{Control, ControlError};
use crate::fragment::Fragment;

/// Session configuration: spawn point, step sizes and clear threshold.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seed for fragment shapes and cube types.
    pub seed: u64,
    /// Where new fragments appear.
    pub spawn: Vec3,
    /// Smallest combo that gets cleared on settle.
    pub min_combo_size: usize,
    /// Degrees per rotation step.
    pub rotation_step: f32,
    /// Cells per translation step.
    pub translation_step: f32,
    /// Place a black anchor cube at the origin so the first fragment has something to rest on.
    pub anchor: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawn: Vec3::new(0.0, 4.0, 0.0),
            min_combo_size: 3,
            rotation_step: 90.0,
            translation_step: 1.0,
            anchor: true,
        }
    }
}

/// Errors a session surfaces to its driver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Control(#[from] ControlError),
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The spawn point is buried: a fresh fragment overlaps these cells.
    #[error("game over: spawn blocked at {} cell(s)", at.len())]
    GameOver { at: Vec<Coord> },
}

/// What an action did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Idle,
    Moved,
    /// The move or drop would overlap these occupied cells; nothing changed.
    Blocked { at: Vec<Coord> },
    ViewRotated { segment: u8 },
    /// Drop refused: the fragment touches nothing in the grid.
    NotConnected,
    Settled {
        placed: Vec<Coord>,
        cleared: Vec<Combo>,
    },
}

/// One game: the grid, the active fragment and the score.
///
/// Each session owns its grid, so independent sessions never share state.
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    control: Control,
    bindings: Bindings,
    rng: StdRng,
    score: u64,
    fragments_settled: u64,
    buried: Option<Vec<Coord>>,
}

impl Session {
    /// Fresh grid (with the anchor cube if configured) and a first fragment.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut grid = Grid::new();
        if config.anchor {
            let anchor = Cube::new(CubeType::Black, Transform::default());
            grid.push(Coord::ORIGIN, GridElement::new(anchor))?;
        }
        Self::with_grid(config, grid)
    }

    /// Start from an existing grid. Fails with [`SessionError::GameOver`] if
    /// the grid already covers the spawn point.
    pub fn with_grid(config: SessionConfig, grid: Grid) -> Result<Self, SessionError> {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut session = Self {
            config,
            grid,
            control: Control::new(),
            bindings: Bindings::standard(),
            rng,
            score: 0,
            fragments_settled: 0,
            buried: None,
        };
        session.spawn_fragment()?;
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut Control {
        &mut self.control
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    /// Cubes cleared so far.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn fragments_settled(&self) -> u64 {
        self.fragments_settled
    }

    /// True once a fragment spawned on top of occupied cells.
    pub fn is_over(&self) -> bool {
        self.buried.is_some()
    }

    /// Replace the active fragment with a random one at the spawn point.
    ///
    /// If the new fragment overlaps the grid at rest the session is over and
    /// every later action returns [`SessionError::GameOver`].
    pub fn spawn_fragment(&mut self) -> Result<(), SessionError> {
        let fragment = Fragment::random(&mut self.rng);
        self.control.place_at(self.config.spawn);
        self.control.set_fragment(fragment);

        let at: Vec<Coord> = self
            .control
            .check_collisions(&self.grid, &Transformation::default())?
            .into_iter()
            .map(|c| c.coord)
            .collect();
        if !at.is_empty() {
            tracing::warn!(spawn = ?self.config.spawn, cells = at.len(), "spawn blocked, game over");
            self.buried = Some(at.clone());
            return Err(SessionError::GameOver { at });
        }
        self.buried = None;
        tracing::debug!(spawn = ?self.config.spawn, "fragment spawned");
        Ok(())
    }

    /// Resolve `key` through the bindings and apply the action.
    pub fn press(&mut self, key: Key) -> Result<Outcome, SessionError> {
        let action = self.bindings.action(key);
        self.apply(action)
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome, SessionError> {
        if let Some(at) = &self.buried {
            return Err(SessionError::GameOver { at: at.clone() });
        }
        match action {
            Action::Transform {
                translation,
                rotation,
            } => {
                let step = Transformation {
                    translation,
                    rotation,
                }
                .scaled(self.config.rotation_step, self.config.translation_step);
                match self.control.try_move(&self.grid, &step) {
                    Ok(()) => Ok(Outcome::Moved),
                    Err(ControlError::Collision(at)) => {
                        tracing::trace!(cells = at.len(), "move blocked");
                        Ok(Outcome::Blocked { at })
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Action::RotateView(delta) => {
                let segment = (i16::from(self.control.segment()) + i16::from(delta)).rem_euclid(4);
                self.control.rotate_to_segment(segment as u8);
                Ok(Outcome::ViewRotated {
                    segment: self.control.segment(),
                })
            }
            Action::Drop => self.settle(),
            Action::Noop => Ok(Outcome::Idle),
        }
    }

    /// Drop the fragment, clear every combo it completes and spawn the next one.
    ///
    /// The drop and clears are kept even when the next spawn is blocked; the
    /// error reports that the game ended.
    fn settle(&mut self) -> Result<Outcome, SessionError> {
        if self.control.fragment().is_none() {
            return Err(ControlError::NoFragment.into());
        }
        if !self.control.is_connected(&self.grid) {
            return Ok(Outcome::NotConnected);
        }
        let placed = match self.control.drop_fragment(&mut self.grid) {
            Ok(placed) => placed,
            Err(ControlError::Grid(GridError::Occupied(at))) | Err(ControlError::Overlap(at)) => {
                return Ok(Outcome::Blocked { at: vec![at] });
            }
            Err(e) => return Err(e.into()),
        };
        self.fragments_settled += 1;

        let min = self.config.min_combo_size;
        let cleared: Vec<Combo> = Combos::detect(&self.grid, placed.iter().copied())
            .into_iter()
            .filter(|combo| combo.len() >= min)
            .collect();
        for combo in &cleared {
            for coord in combo.coords() {
                self.grid.pop(coord);
            }
            self.score += combo.len() as u64;
            tracing::debug!(kind = %combo.kind, size = combo.len(), "combo cleared");
        }

        self.spawn_fragment()?;
        Ok(Outcome::Settled { placed, cleared })
    }
}
