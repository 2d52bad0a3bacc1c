//! Window runtime.
//!
//! Owns the `winit` EventLoop and Window, wires the window to the GPU surface and
//! runs the loop driver from the platform event loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
