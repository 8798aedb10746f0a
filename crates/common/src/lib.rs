//! Shared value types for the craftris core.
//!
//! # Invariants
//! - Grid keys are integer coordinates; world positions are snapped before use.
//! - Transform snapshots restore translation, rotation and scale exactly.

pub mod coord;
pub mod cube_type;
pub mod types;

pub use coord::Coord;
pub use cube_type::CubeType;
pub use types::{CubeId, Transform, TransformSnapshot, Transformation};
