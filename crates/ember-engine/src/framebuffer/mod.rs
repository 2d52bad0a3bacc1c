//! Software framebuffer.
//!
//! CPU-side pixel grid that simulation and render callbacks draw into. The buffer is
//! handed to a [`PresentSurface`](crate::present::PresentSurface) once per loop
//! iteration.
//!
//! Conventions:
//! - origin top-left, +X right, +Y down
//! - pixels are packed BGRA (`Color`), alpha unused

mod buffer;
mod color;

pub use buffer::Framebuffer;
pub use color::Color;
