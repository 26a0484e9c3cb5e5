//! GPU-facing vertex, index and uniform layouts.

use asset::mesh::{MeshData, MeshVertex};
use bytemuck::{Pod, Zeroable};
use corelib::{camera::Camera, light::Light, transform::Transform};
use wgpu::{IndexFormat, VertexBufferLayout, VertexStepMode};

/// Vertex: position + normal + color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3],
    };
}

impl From<&MeshVertex> for Vertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            pos: v.position,
            normal: v.normal,
            color: v.color,
        }
    }
}

pub fn vertices_of(mesh: &MeshData) -> Vec<Vertex> {
    mesh.vertices.iter().map(Vertex::from).collect()
}

/// Index list in the narrowest format that can address every vertex.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    pub fn from_indices(indices: &[u32]) -> Self {
        let narrow: Option<Vec<u16>> = indices.iter().map(|&i| u16::try_from(i).ok()).collect();
        match narrow {
            Some(short) => Self::U16(short),
            None => Self::U32(indices.to_vec()),
        }
    }

    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Per-frame UBO (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
}

impl FrameUniforms {
    pub fn new(camera: &Camera, model: &Transform, light: &Light) -> Self {
        Self {
            model_view: (camera.view() * model.matrix()).to_cols_array_2d(),
            projection: camera.proj().to_cols_array_2d(),
            light_pos: light.position.to_array(),
        }
    }
}
