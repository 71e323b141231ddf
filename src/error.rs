use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("mesh density {value} is outside {min}..={max}")]
    InvalidDensity { value: u32, min: u32, max: u32 },

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type AppResult<T> = Result<T, AppError>;
