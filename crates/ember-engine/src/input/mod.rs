//! Input events.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window runtime translates platform events into `WindowInput` and forwards them
//! to the loop driver's event handler.

pub(crate) mod platform;
mod types;

pub use types::{ButtonState, Key, MouseButton, WindowInput};
