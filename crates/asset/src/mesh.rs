//! CPU-side mesh representation used by loaders.

use glam::Vec3;

/// Vertex with position/normal/color. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    /// Vertex at `position` with zero normal and black color.
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both buffers are non-empty, the index list is made of
    /// whole triangles and every index points at a vertex.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
            && !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = Vec3::from(self.vertices.first()?.position);
        let (min, max) = self
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position))
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some((min.to_array(), max.to_array()))
    }

    /// Smooth normals: every vertex gets the normalized sum of the unit face
    /// normals of the triangles that use it.
    ///
    /// Degenerate triangles contribute nothing and unreferenced vertices keep a
    /// zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (Some(v0), Some(v1), Some(v2)) = (
                self.vertices.get(i0),
                self.vertices.get(i1),
                self.vertices.get(i2),
            ) else {
                log::warn!("Skipping triangle {:?} with out-of-range index", tri);
                continue;
            };

            let p0 = Vec3::from(v0.position);
            let a = Vec3::from(v1.position) - p0;
            let b = Vec3::from(v2.position) - p0;
            let normal = a.cross(b).normalize_or_zero();

            acc[i0] += normal;
            acc[i1] += normal;
            acc[i2] += normal;
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(acc) {
            vertex.normal = sum.normalize_or_zero().to_array();
        }
    }
}
