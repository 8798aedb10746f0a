use std::collections::BTreeMap;
use std::fmt;

use craftris_common::{Coord, CubeType};
use serde::Serialize;

use crate::element::GridElement;

/// Errors from grid mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell {0} is already occupied")]
    Occupied(Coord),
}

/// Sparse occupancy grid keyed by integer coordinates.
///
/// The grid is unbounded; every coordinate is valid. Bounding the play field
/// is left to the caller. Uses BTreeMap so iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: BTreeMap<Coord, GridElement>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `element` at `coord`. Fails without touching the grid if the cell is taken.
    pub fn push(&mut self, coord: Coord, element: GridElement) -> Result<(), GridError> {
        if self.cells.contains_key(&coord) {
            tracing::debug!(%coord, "push rejected, cell occupied");
            return Err(GridError::Occupied(coord));
        }
        tracing::debug!(%coord, kind = %element.kind(), "push");
        self.cells.insert(coord, element);
        Ok(())
    }

    /// Element at `coord`, if any.
    pub fn pull(&self, coord: Coord) -> Option<&GridElement> {
        self.cells.get(&coord)
    }

    /// Remove and return the element at `coord`.
    pub fn pop(&mut self, coord: Coord) -> Option<GridElement> {
        let removed = self.cells.remove(&coord);
        if let Some(ref element) = removed {
            tracing::debug!(%coord, kind = %element.kind(), "pop");
        }
        removed
    }

    /// Occupied cells among the six face neighbors of `coord`.
    pub fn find_neighbors(&self, coord: Coord) -> Vec<(Coord, &GridElement)> {
        coord
            .neighbors()
            .filter_map(|n| self.cells.get(&n).map(|e| (n, e)))
            .collect()
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All occupied cells in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &GridElement)> {
        self.cells.iter().map(|(c, e)| (*c, e))
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Occupancy counts for inspection and debugging.
    pub fn summary(&self) -> GridSummary {
        let mut by_kind = BTreeMap::new();
        for element in self.cells.values() {
            *by_kind.entry(element.kind()).or_insert(0) += 1;
        }
        GridSummary {
            occupied: self.cells.len(),
            by_kind,
        }
    }
}

/// Snapshot of how many cells are occupied, in total and per type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub occupied: usize,
    pub by_kind: BTreeMap<CubeType, usize>,
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid: occupied={}", self.occupied)?;
        for (kind, count) in &self.by_kind {
            write!(f, " {kind}={count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Cube;
    use craftris_common::Transform;

    fn element(kind: CubeType) -> GridElement {
        GridElement::new(Cube::new(kind, Transform::default()))
    }

    #[test]
    fn push_pull_pop() {
        let mut grid = Grid::new();
        let e = element(CubeType::Green);
        let id = e.id();

        grid.push(Coord::ORIGIN, e).unwrap();
        assert_eq!(grid.pull(Coord::ORIGIN).unwrap().id(), id);

        let popped = grid.pop(Coord::ORIGIN).unwrap();
        assert_eq!(popped.id(), id);
        assert!(grid.pull(Coord::ORIGIN).is_none());
        assert!(grid.pop(Coord::ORIGIN).is_none());
    }

    #[test]
    fn push_on_occupied_cell_is_rejected() {
        let mut grid = Grid::new();
        let first = element(CubeType::Red);
        let first_id = first.id();
        grid.push(Coord::new(1, 2, 3), first).unwrap();

        let err = grid
            .push(Coord::new(1, 2, 3), element(CubeType::Blue))
            .unwrap_err();
        assert_eq!(err, GridError::Occupied(Coord::new(1, 2, 3)));
        assert_eq!(grid.pull(Coord::new(1, 2, 3)).unwrap().id(), first_id);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn pull_is_side_effect_free() {
        let mut grid = Grid::new();
        grid.push(Coord::new(0, 1, 0), element(CubeType::Cyan)).unwrap();
        let first = grid.pull(Coord::new(0, 1, 0)).cloned();
        for _ in 0..100 {
            assert_eq!(grid.pull(Coord::new(0, 1, 0)).cloned(), first);
            assert!(grid.pull(Coord::new(9, 9, 9)).is_none());
        }
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn find_neighbors_on_empty_grid() {
        let grid = Grid::new();
        assert!(grid.find_neighbors(Coord::ORIGIN).is_empty());
        assert!(grid.find_neighbors(Coord::new(-100, 5, 42)).is_empty());
    }

    #[test]
    fn find_neighbors_returns_only_face_neighbors() {
        let mut grid = Grid::new();
        let c = Coord::new(3, 3, 3);
        grid.push(c, element(CubeType::Red)).unwrap();
        grid.push(Coord::new(4, 3, 3), element(CubeType::Red)).unwrap();
        grid.push(Coord::new(3, 3, 2), element(CubeType::Blue)).unwrap();
        // diagonal and two-away cells are not neighbors
        grid.push(Coord::new(4, 4, 3), element(CubeType::Red)).unwrap();
        grid.push(Coord::new(3, 5, 3), element(CubeType::Red)).unwrap();

        let mut found: Vec<Coord> = grid.find_neighbors(c).into_iter().map(|(n, _)| n).collect();
        found.sort();
        let mut expected = vec![Coord::new(4, 3, 3), Coord::new(3, 3, 2)];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn unbounded_coordinates() {
        let mut grid = Grid::new();
        let far = Coord::new(i32::MAX - 1, i32::MIN + 1, 1_000_000);
        grid.push(far, element(CubeType::Yellow)).unwrap();
        assert!(grid.is_occupied(far));
    }

    #[test]
    fn find_neighbors_at_range_edge() {
        let mut grid = Grid::new();
        let edge = Coord::new(i32::MAX, 0, 0);
        let inside = Coord::new(i32::MAX - 1, 0, 0);
        grid.push(edge, element(CubeType::Red)).unwrap();
        grid.push(inside, element(CubeType::Red)).unwrap();
        // would wrap to the far side if offsets overflowed
        grid.push(Coord::new(i32::MIN, 0, 0), element(CubeType::Red)).unwrap();

        let found: Vec<Coord> = grid.find_neighbors(edge).into_iter().map(|(n, _)| n).collect();
        assert_eq!(found, vec![inside]);
        assert_eq!(grid.find_neighbors(Coord::new(i32::MIN, i32::MIN, i32::MIN)).len(), 0);
    }

    #[test]
    fn summary_counts_per_kind() {
        let mut grid = Grid::new();
        grid.push(Coord::new(0, 0, 0), element(CubeType::Red)).unwrap();
        grid.push(Coord::new(1, 0, 0), element(CubeType::Red)).unwrap();
        grid.push(Coord::new(2, 0, 0), element(CubeType::Blue)).unwrap();

        let summary = grid.summary();
        assert_eq!(summary.occupied, 3);
        assert_eq!(summary.by_kind[&CubeType::Red], 2);
        assert_eq!(summary.by_kind[&CubeType::Blue], 1);
        assert_eq!(summary.to_string(), "Grid: occupied=3 Red=2 Blue=1");
    }

    #[test]
    fn iteration_is_ordered() {
        let mut grid = Grid::new();
        for x in [5, -2, 3, 0] {
            grid.push(Coord::new(x, 0, 0), element(CubeType::Green)).unwrap();
        }
        let keys: Vec<Coord> = grid.iter().map(|(c, _)| c).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        grid.clear();
        assert!(grid.is_empty());
    }
}
