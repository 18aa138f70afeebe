//! World-space placement and orientation helpers.
//!
//! Lanes store their curve in a local frame attached to a rigid
//! [`Placement`].  Vehicles keep a world position plus a `Quat` orientation
//! whose local `+Z` axis is the direction of travel and `+Y` is up.

pub use glam::{Mat3, Quat, Vec3};

/// Rigid transform (translation + rotation, no scale) from a lane's local
/// frame into world space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub translation: Vec3,
    pub rotation:    Quat,
}

impl Placement {
    pub const IDENTITY: Placement = Placement {
        translation: Vec3::ZERO,
        rotation:    Quat::IDENTITY,
    };

    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    /// Placement that only translates.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    /// Placement rotated `yaw` radians about the world up axis.
    #[inline]
    pub fn from_yaw(translation: Vec3, yaw: f32) -> Self {
        Self { translation, rotation: Quat::from_rotation_y(yaw) }
    }

    /// Map a local point into world space (rotate, then translate).
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation * p + self.translation
    }

    /// Map a local direction into world space (rotation only).
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Orientation whose local `+Z` points along `forward`, keeping `+Y` as close
/// to world up as possible.
///
/// Returns `None` for a zero (or non-finite) direction.
pub fn look_rotation(forward: Vec3) -> Option<Quat> {
    let fwd = forward.try_normalize()?;
    let right = Vec3::Y.cross(fwd);
    if right.length_squared() < 1e-8 {
        // Looking straight up or down: any roll is as good as another.
        return Some(Quat::from_rotation_arc(Vec3::Z, fwd));
    }
    let right = right.normalize();
    let up = fwd.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, fwd)))
}
