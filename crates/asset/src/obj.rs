//! Minimal OBJ parser for triangle meshes.
//!
//! Only positions are carried into [`MeshData`]; `vt`/`vn` records are checked
//! so faces referencing them resolve, but normals are regenerated afterwards.
//! Each distinct `v/vt/vn` reference is its own vertex, so split normals and
//! UV seams keep hard edges while plain `f a b c` faces share positions.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result, anyhow};

use crate::mesh::{MeshData, MeshVertex};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.as_ref().display()))?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<MeshData> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<MeshData> {
    parse_obj(io::Cursor::new(contents))
}

/// Distinct `v/vt/vn` reference; each one becomes its own output vertex.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct Key(usize, Option<usize>, Option<usize>);

fn parse_obj<R: BufRead>(reader: R) -> Result<MeshData> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut texcoord_count = 0usize;
    let mut normal_count = 0usize;

    let mut unique: HashMap<Key, u32> = HashMap::new();
    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let tag = parts
            .next()
            .ok_or_else(|| anyhow!("Malformed OBJ line {}: '{}'", line_no + 1, trimmed))?;

        match tag {
            "v" => {
                let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                positions.push([x, y, z]);
            }
            "vt" => {
                parse_f32(parts.next(), line_no, "u coordinate")?;
                texcoord_count += 1;
            }
            "vn" => {
                parse_f32(parts.next(), line_no, "nx coordinate")?;
                parse_f32(parts.next(), line_no, "ny coordinate")?;
                parse_f32(parts.next(), line_no, "nz coordinate")?;
                normal_count += 1;
            }
            "f" => {
                let keys = parts
                    .map(|part| {
                        parse_face_vertex(
                            part,
                            positions.len(),
                            texcoord_count,
                            normal_count,
                            line_no,
                        )
                    })
                    .collect::<Result<Vec<Key>>>()?;

                if keys.len() < 3 {
                    log::debug!(
                        "Skipping face with {} vertices on line {}",
                        keys.len(),
                        line_no + 1
                    );
                    continue;
                }

                let mut face_indices: Vec<u32> = Vec::with_capacity(keys.len());
                for key in keys {
                    let index = match unique.get(&key) {
                        Some(&idx) => idx,
                        None => {
                            let idx = u32::try_from(vertices.len())
                                .map_err(|_| anyhow!("Too many vertices in OBJ (>{})", u32::MAX))?;
                            vertices.push(MeshVertex::at(positions[key.0]));
                            unique.insert(key, idx);
                            idx
                        }
                    };
                    face_indices.push(index);
                }

                // Triangulate fan
                for tri in 1..(face_indices.len() - 1) {
                    indices.push(face_indices[0]);
                    indices.push(face_indices[tri]);
                    indices.push(face_indices[tri + 1]);
                }
            }
            _ => {
                // Ignore other directives (o/g/s/usemtl/etc.)
            }
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        anyhow::bail!("OBJ contained no triangles");
    }

    Ok(MeshData::new(vertices, indices))
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> Result<f32> {
    let token = value.ok_or_else(|| anyhow!("Missing {} on line {}", what, line_no + 1))?;
    token
        .parse::<f32>()
        .with_context(|| format!("Failed to parse {} on line {}", what, line_no + 1))
}

/// Resolve a `v`, `v/vt`, `v//vn` or `v/vt/vn` token to zero-based indices.
fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    tex_count: usize,
    norm_count: usize,
    line_no: usize,
) -> Result<Key> {
    let mut split = token.split('/');
    let pos = split
        .next()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| anyhow!("Malformed face element '{}' on line {}", token, line_no + 1))?;
    let pos_idx = resolve_index(pos, pos_count, line_no)?;

    let tex_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, tex_count, line_no)?),
        _ => None,
    };
    let norm_idx = match split.next() {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count, line_no)?),
        _ => None,
    };

    Ok(Key(pos_idx, tex_idx, norm_idx))
}

fn resolve_index(token: &str, len: usize, line_no: usize) -> Result<usize> {
    let raw = token
        .parse::<i64>()
        .with_context(|| format!("Invalid index '{}' on line {}", token, line_no + 1))?;
    if raw == 0 {
        anyhow::bail!("OBJ indices are 1-based; found 0 on line {}", line_no + 1);
    }

    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };

    if idx < 0 || idx as usize >= len {
        anyhow::bail!(
            "OBJ index {} resolved out of bounds (len={}) on line {}",
            raw,
            len,
            line_no + 1
        );
    }

    Ok(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn quad_is_fan_triangulated_and_shares_identical_references() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\nf 1//1 3//1 2//1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 2, 1]);
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn split_normals_keep_a_hard_edge() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 -1\nvn 0 0 1\nvn 0 1 0\nf 1//1 2//1 3//1\nf 1//2 2//2 4//2\n";
        let mut mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);

        mesh.compute_vertex_normals();
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[3].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn skipped_faces_leave_no_orphan_vertices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nf 4 1\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert!(mesh.vertices.iter().all(|v| v.position != [5.0, 5.0, 5.0]));
    }

    #[test]
    fn reader_and_path_loaders_parse_the_same_mesh() {
        let from_reader = load_obj_from_reader(io::Cursor::new(crate::DECORATIONS_OBJ)).unwrap();
        assert_eq!(from_reader, load_obj_from_str(crate::DECORATIONS_OBJ).unwrap());

        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/decorations.obj");
        assert_eq!(load_obj_from_path(&path).unwrap(), from_reader);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load_obj_from_path("/nonexistent/mesh.obj").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mesh.obj"), "{err}");
    }

    #[test]
    fn negative_indices_are_relative() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices[2].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_and_out_of_range_indices_fail() {
        let zero = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(zero.to_string().contains("1-based"), "{zero}");

        let oob = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(oob.to_string().contains("line 4"), "{oob}");
    }

    #[test]
    fn bad_coordinate_reports_line() {
        let err = load_obj_from_str("# header\nv 0 zero 0\n").unwrap_err();
        assert!(err.to_string().contains("y coordinate on line 2"), "{err}");
    }

    #[test]
    fn mesh_without_faces_is_rejected() {
        assert!(load_obj_from_str("v 0 0 0\nv 1 0 0\nf 1 2\n").is_err());
        assert!(load_obj_from_str("").is_err());
    }

    #[test]
    fn embedded_decorations_parse() {
        let mesh = load_obj_from_str(crate::DECORATIONS_OBJ).unwrap();
        assert_eq!(mesh.vertices.len(), 18);
        assert_eq!(mesh.triangle_count(), 24);
        assert!(mesh.is_valid());
    }
}
