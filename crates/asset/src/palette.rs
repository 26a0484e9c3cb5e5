//! Height-based vertex coloring.

use crate::mesh::MeshData;

pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

/// Three color bands split along the object-space Y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightBands {
    /// Vertices with `y <= low` take `low_color`.
    pub low: f32,
    /// Vertices with `y >= high` take `high_color` (unless already low).
    pub high: f32,
    pub low_color: [f32; 3],
    pub mid_color: [f32; 3],
    pub high_color: [f32; 3],
}

impl HeightBands {
    pub fn color_for(&self, position: [f32; 3]) -> [f32; 3] {
        let y = position[1];
        if y <= self.low {
            self.low_color
        } else if y >= self.high {
            self.high_color
        } else {
            self.mid_color
        }
    }
}

impl Default for HeightBands {
    fn default() -> Self {
        Self {
            low: -8.0,
            high: 9.0,
            low_color: RED,
            mid_color: BLUE,
            high_color: GREEN,
        }
    }
}

impl MeshData {
    pub fn apply_height_colors(&mut self, bands: &HeightBands) {
        for v in &mut self.vertices {
            v.color = bands.color_for(v.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_inclusive() {
        let bands = HeightBands::default();
        assert_eq!(bands.color_for([0.0, -8.0, 0.0]), RED);
        assert_eq!(bands.color_for([0.0, -7.99, 0.0]), BLUE);
        assert_eq!(bands.color_for([0.0, 8.99, 0.0]), BLUE);
        assert_eq!(bands.color_for([0.0, 9.0, 0.0]), GREEN);
    }

    #[test]
    fn only_y_matters() {
        let bands = HeightBands::default();
        assert_eq!(bands.color_for([100.0, 0.0, -100.0]), BLUE);
    }

    #[test]
    fn overlapping_bands_prefer_low() {
        let bands = HeightBands {
            low: 5.0,
            high: 0.0,
            ..HeightBands::default()
        };
        assert_eq!(bands.color_for([0.0, 2.0, 0.0]), RED);
        assert_eq!(bands.color_for([0.0, 6.0, 0.0]), GREEN);
    }
}
