use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique handle of a placed cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CubeId(pub Uuid);

impl CubeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CubeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local-to-parent matrix: scale, then rotation, then translation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Translate along this transform's own axes.
    pub fn translate_local(&mut self, translation: Vec3) {
        self.position += self.rotation * (self.scale * translation);
    }

    /// Rotate in the parent frame. The position is carried around the parent origin.
    pub fn rotate_in_parent(&mut self, rotation: Quat) {
        self.position = rotation * self.position;
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Rotate about this transform's own origin and axes.
    pub fn rotate_local(&mut self, rotation: Quat) {
        self.rotation = (self.rotation * rotation).normalize();
    }

    /// Capture the full state for a later exact [`Transform::restore`].
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Set translation, rotation and scale from a snapshot in one step.
    pub fn restore(&mut self, snapshot: &TransformSnapshot) {
        *self = Self {
            position: snapshot.position,
            rotation: snapshot.rotation,
            scale: snapshot.scale,
        };
    }
}

/// Saved state of a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// A candidate move of a fragment: a translation and a rotation in degrees.
///
/// The rotation is `Ry * Rx * Rz`, so on a vector the Z turn acts first, then X, then Y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transformation {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl Transformation {
    pub fn translate(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Vec3::ZERO,
        }
    }

    pub fn rotate(rotation: Vec3) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
        }
    }

    /// Scale unit directions up to full steps, e.g. 90 degrees and one cell.
    pub fn scaled(&self, rotation_step: f32, translation_step: f32) -> Self {
        Self {
            translation: self.translation * translation_step,
            rotation: self.rotation * rotation_step,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation == Vec3::ZERO && self.rotation == Vec3::ZERO
    }

    /// Rotation part as the quaternion `Ry * Rx * Rz`.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }
}
