use std::f32::consts::FRAC_PI_2;

use crate::Vec4;

/// Orbit radius of the default light around the view axis.
const LIGHT_RADIUS: f32 = 55.0;

/// Point light given in eye space. It does not follow the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec4,
}

impl Light {
    /// Light placed at `angle` on a circle of radius 55 in the plane z = -60.
    pub fn on_orbit(angle: f32) -> Self {
        Self {
            position: Vec4::new(
                angle.sin() * LIGHT_RADIUS,
                angle.cos() * LIGHT_RADIUS,
                -60.0,
                1.0,
            ),
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::on_orbit(FRAC_PI_2)
    }
}
