use thiserror::Error;

/// Failures while bringing up the GPU or building the draw pipeline.
/// All of them abort initialisation.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter for backends {0:?}")]
    NoAdapter(wgpu::Backends),
    #[error("Failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("Shader failed to compile: {0}")]
    Shader(String),
    #[error("Render pipeline failed to link: {0}")]
    Pipeline(String),
    #[error("Mesh has no drawable triangles")]
    EmptyMesh,
}
