/// Owner transform seam.
///
/// The scene graph is not part of this crate. Whatever node owns a camera
/// only has to expose its final world position and orientation for the
/// current tick through `TransformSource`.

use glam::{Mat3, Quat, Vec3};

/// Read-only access to a scene node's world transform.
pub trait TransformSource {
    /// World-space position.
    fn world_position(&self) -> Vec3;

    /// World-space orientation. The camera looks down its local -Z axis.
    fn world_rotation(&self) -> Quat;
}

/// Plain rigid transform (position + orientation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    /// Origin, looking down world -Z.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    /// Transform at `position` whose -Z axis points at `target`.
    ///
    /// `up` must not be parallel to the viewing direction.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let back = (position - target).normalize();
        let right = up.cross(back).normalize();
        let true_up = back.cross(right);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, true_up, back));
        Self { position, rotation }
    }

    /// Snapshot any transform source.
    pub fn from_source(source: &impl TransformSource) -> Self {
        Self {
            position: source.world_position(),
            rotation: source.world_rotation(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformSource for Transform {
    fn world_position(&self) -> Vec3 {
        self.position
    }

    fn world_rotation(&self) -> Quat {
        self.rotation
    }
}
