//! Ember engine crate.
//!
//! Software-rendered presentation loop: a CPU framebuffer, tick-rate limited update
//! and render cadences, and a winit/wgpu runtime that puts the framebuffer on screen.

pub mod time;
pub mod framebuffer;
pub mod present;
pub mod driver;

pub mod device;
pub mod window;
pub mod input;

pub mod random;
pub mod logging;
