//! Error types for startup failures

use thiserror::Error;

/// Errors that prevent an app from starting
#[derive(Debug, Error)]
pub enum LumenError {
    #[error("failed to create or run the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface supports no texture formats on this adapter")]
    NoSurfaceFormat,

    #[error("failed to create render pipelines: {}", .0.join("; "))]
    Pipelines(Vec<String>),
}

pub type Result<T> = std::result::Result<T, LumenError>;
