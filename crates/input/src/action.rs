use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A high-level action produced by the input layer.
///
/// Transform directions are unit steps; the session scales them to full
/// rotations and cell-sized translations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Rotate and/or translate the active fragment.
    Transform { translation: Vec3, rotation: Vec3 },
    /// Turn the view by this many quarter segments.
    RotateView(i8),
    /// Settle the active fragment into the grid.
    Drop,
    /// No-op (used for keys that aren't bound).
    Noop,
}

impl Action {
    pub fn translate(translation: Vec3) -> Self {
        Self::Transform {
            translation,
            rotation: Vec3::ZERO,
        }
    }

    pub fn rotate(rotation: Vec3) -> Self {
        Self::Transform {
            translation: Vec3::ZERO,
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_one_half() {
        assert_eq!(
            Action::translate(Vec3::X),
            Action::Transform {
                translation: Vec3::X,
                rotation: Vec3::ZERO,
            }
        );
        assert_eq!(
            Action::rotate(Vec3::NEG_Y),
            Action::Transform {
                translation: Vec3::ZERO,
                rotation: Vec3::NEG_Y,
            }
        );
    }
}
