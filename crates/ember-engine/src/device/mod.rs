//! GPU presentation backend.
//!
//! The framebuffer is drawn on the CPU; the GPU is only used to put it on screen.
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - uploading framebuffer bytes into a texture and blitting it to the surface

mod blit;
mod error;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use gpu::Gpu;
pub use init::GpuInit;
