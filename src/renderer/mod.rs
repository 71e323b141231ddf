pub mod camera;
pub mod gpu;
pub mod scene_buffers;

pub use camera::Camera;
pub use gpu::GpuState;
