//! Sparse voxel occupancy grid with same-type combo detection.
//!
//! # Invariants
//! - At most one element per coordinate; pushing onto an occupied cell is rejected.
//! - `pull` never mutates the grid.
//! - Combos never join cubes of different types and never bridge empty cells.

mod combos;
mod element;
mod grid;

pub use combos::{Combo, Combos};
pub use element::{Cube, GridElement};
pub use grid::{Grid, GridError, GridSummary};
