use shadowbox_common::Viewport;

/// Errors from the wgpu backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
    #[error("viewport {0} has a zero dimension")]
    EmptyViewport(Viewport),
    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),
    #[error("readback channel closed before the buffer was mapped")]
    ReadbackChannel,
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
