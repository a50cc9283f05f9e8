//! World-space transform: position, rotation (quaternion), scale.
//!
//! `Transform` is `Copy` and `Default`, so every scene entity embeds one.
//! Picking uses `.matrix()` to move an entity's local bounds into world
//! space.

use glam::{Mat4, Quat, Vec3};

/// World-space transform component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
    /// Non-uniform scale factor.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Build the TRS model matrix (`T * R * S`).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matrix() {
        let t = Transform::default();
        assert!(t.matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn matrix_applies_scale_before_translation() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::splat(2.0),
            ..Transform::IDENTITY
        };
        let p = t.matrix().transform_point3(Vec3::ONE);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 4.0, 5.0), 1e-5));
    }
}
