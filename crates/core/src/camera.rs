use crate::{CoreError, CoreResult, Mat4, Vec3};

/// Simple perspective camera (right-handed).
///
/// The default eye sits at the origin looking down -Z, so `view()` is the
/// identity and a model-view matrix can be fed straight into `proj()`.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    /// 45 degree camera at the origin sized for a `width` x `height` surface.
    pub fn with_surface_size(width: u32, height: u32) -> CoreResult<Self> {
        Ok(Self::default().with_aspect(surface_aspect(width, height)?))
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection with depth in [0, 1], as wgpu expects.
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(
            Vec3::ZERO,
            Vec3::NEG_Z,
            Vec3::Y,
            45f32.to_radians(),
            0.1,
            100.0,
            1.0,
        )
    }
}

/// Width / height, rejecting zero-sized (minimised) surfaces.
pub fn surface_aspect(width: u32, height: u32) -> CoreResult<f32> {
    if width == 0 || height == 0 {
        return Err(CoreError::ZeroSizedSurface { width, height });
    }
    Ok(width as f32 / height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_identity() {
        let cam = Camera::default();
        assert!(cam.view().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert_eq!(
            Camera::with_surface_size(800, 0).map(|c| c.aspect),
            Err(CoreError::ZeroSizedSurface {
                width: 800,
                height: 0
            })
        );
    }

    #[test]
    fn near_plane_maps_to_zero_depth() {
        let cam = Camera::with_surface_size(640, 480).unwrap();
        let clip = cam.proj() * crate::Vec4::new(0.0, 0.0, -cam.z_near, 1.0);
        assert!((clip.z / clip.w).abs() < 1e-5);
    }
}
