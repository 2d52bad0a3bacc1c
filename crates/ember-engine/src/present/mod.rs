//! Presentation contract.
//!
//! A `PresentSurface` is anything that can show a CPU pixel buffer: the wgpu-backed
//! [`Gpu`](crate::device::Gpu) for windows, or [`HeadlessSurface`] when no display is
//! available. The loop driver only relies on this trait.

mod headless;
mod image;

pub use headless::HeadlessSurface;
pub use image::{FrameImage, PixelFormat, PixelLayout, RowOrder};

use anyhow::Result;

/// Display target for framebuffer contents.
pub trait PresentSurface {
    /// Current drawable area in physical pixels.
    fn drawable_size(&self) -> (u32, u32);

    /// Shows `image`. Synchronous: returns after the transfer has been issued.
    ///
    /// Errors are fatal for the loop; transient conditions are handled internally.
    fn present(&mut self, image: &FrameImage<'_>) -> Result<()>;
}
