use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use crate::{EulerRot, Mat4, Quat, Vec3};

/// Rigid transform with uniform or non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order, i.e. `Rx * Ry * Rz`).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// Object-to-eye placement of the decorations mesh: translate by
    /// (0, -25, -60), rotate -pi/2 about X, then pi/3 about Z.
    /// The model's Z axis ends up pointing up on screen.
    pub fn decorations_view() -> Self {
        Self::from_trs(
            Vec3::new(0.0, -25.0, -60.0),
            Vec3::new(-FRAC_PI_2, 0.0, FRAC_PI_3),
            Vec3::ONE,
        )
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorations_view_matches_reference_matrix() {
        #[rustfmt::skip]
        let expected = [
            0.5, 0.0, -0.86602, 0.0,
            -0.86602, 0.0, -0.5, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, -25.0, -60.0, 1.0,
        ];
        let m = Transform::decorations_view().matrix().to_cols_array();
        for (got, want) in m.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-4, "got {got}, want {want}");
        }
    }

    #[test]
    fn euler_z_is_applied_last() {
        // Adding to the Z angle must equal post-multiplying a Z rotation.
        let base = Transform::decorations_view();
        let mut turned = base;
        turned.rotation_euler.z += 0.7;
        let expected = base.matrix() * Mat4::from_rotation_z(0.7);
        assert!(turned.matrix().abs_diff_eq(expected, 1e-5));
    }
}
