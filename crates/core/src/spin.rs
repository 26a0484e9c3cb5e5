//! Rotation accumulator for the model's local Z axis.

use std::f32::consts::TAU;

use crate::transform::Transform;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    /// Accumulated angle in radians, kept in [0, 2pi).
    pub angle: f32,
    /// Radians per second.
    pub speed: f32,
}

impl Spin {
    pub fn new(speed: f32) -> Self {
        Self { angle: 0.0, speed }
    }

    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.speed * dt).rem_euclid(TAU);
    }

    /// `base` followed by a rotation of `angle` about the local Z axis.
    pub fn apply(&self, base: &Transform) -> Transform {
        let mut t = *base;
        t.rotation_euler.z += self.angle;
        t
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(1.0)
    }
}
