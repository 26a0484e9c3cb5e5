//! Asset loading/parsers and CPU-side mesh preparation.
//! OBJ text -> indexed mesh -> smooth normals -> height colors.

pub mod mesh;
pub mod obj;
pub mod palette;

use std::path::Path;

use anyhow::{Context, Result};

use crate::mesh::MeshData;
use crate::palette::HeightBands;

/// Built-in decorations mesh: three baubles at heights -12, 0 and 12.
pub const DECORATIONS_OBJ: &str = include_str!("../assets/decorations.obj");

/// Parse OBJ text and fill in normals and colors, ready for upload.
pub fn prepare_mesh(obj_src: &str, bands: &HeightBands) -> Result<MeshData> {
    let mesh = obj::load_obj_from_str(obj_src).context("Failed to load mesh")?;
    Ok(shade_mesh(mesh, bands))
}

/// Same as [`prepare_mesh`] for an OBJ file on disk.
pub fn prepare_mesh_from_path(path: impl AsRef<Path>, bands: &HeightBands) -> Result<MeshData> {
    let path = path.as_ref();
    let mesh = obj::load_obj_from_path(path)
        .with_context(|| format!("Failed to load mesh from {}", path.display()))?;
    Ok(shade_mesh(mesh, bands))
}

/// Regenerate normals and apply height colors to a parsed mesh.
pub fn shade_mesh(mut mesh: MeshData, bands: &HeightBands) -> MeshData {
    mesh.compute_vertex_normals();
    mesh.apply_height_colors(bands);

    if let Some((min, max)) = mesh.bounds() {
        log::info!(
            "Mesh ready: {} vertices, {} triangles, bounds {:?}..{:?}",
            mesh.vertices.len(),
            mesh.triangle_count(),
            min,
            max
        );
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLUE, GREEN, RED};

    #[test]
    fn decorations_get_one_color_per_bauble() {
        let mesh = prepare_mesh(DECORATIONS_OBJ, &HeightBands::default()).unwrap();
        let count = |c: [f32; 3]| mesh.vertices.iter().filter(|v| v.color == c).count();
        assert_eq!(count(RED), 6);
        assert_eq!(count(BLUE), 6);
        assert_eq!(count(GREEN), 6);
    }

    #[test]
    fn path_and_text_preparation_agree() {
        let bands = HeightBands::default();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/decorations.obj");
        assert_eq!(
            prepare_mesh_from_path(&path, &bands).unwrap(),
            prepare_mesh(DECORATIONS_OBJ, &bands).unwrap()
        );

        let err = prepare_mesh_from_path("/nonexistent/mesh.obj", &bands).unwrap_err();
        assert!(err.to_string().contains("Failed to load mesh from"), "{err}");
    }

    #[test]
    fn decorations_normals_are_unit_and_point_outwards() {
        let mesh = prepare_mesh(DECORATIONS_OBJ, &HeightBands::default()).unwrap();
        for (i, v) in mesh.vertices.iter().enumerate() {
            let n = glam::Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5, "vertex {i}: {n}");

            // Octahedron tips: the normal is the axis from the bauble center.
            let center = mesh.vertices[i - i % 6].position;
            let center = glam::Vec3::new(0.0, center[1], 25.0);
            let outward = (glam::Vec3::from(v.position) - center).normalize();
            assert!(n.abs_diff_eq(outward, 1e-5), "vertex {i}: {n} vs {outward}");
        }
    }
}
