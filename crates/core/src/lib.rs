//! Core types: math re-exports, Transform, Camera, Light and frame timing.

pub use glam::{EulerRot, Mat4, Quat, Vec3, Vec4, vec3};

use thiserror::Error;

pub mod camera;
pub mod clock;
pub mod light;
pub mod spin;
pub mod transform;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Surface size must be non-zero, got {width}x{height}")]
    ZeroSizedSurface { width: u32, height: u32 },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform::from_trs(
            vec3(1.0, 2.0, 3.0),
            vec3(0.0, 0.0, 0.0),
            vec3(2.0, 2.0, 2.0),
        );
        // Last column holds translation, diagonal holds scale (no rotation).
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 2.0).abs() < 1e-6);
        assert!((m[5] - 2.0).abs() < 1e-6);
        assert!((m[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn spun_model_view_projection_is_finite() {
        let cam = camera::Camera::with_surface_size(1280, 720).expect("camera");
        let mut spin = spin::Spin::default();
        spin.advance(2.5);
        let mv = spin.apply(&transform::Transform::decorations_view()).matrix();
        let a = (cam.proj_view() * mv).to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }
}
