//! Loop driver.
//!
//! Single-threaded control loop that ties events, tick limiters and the framebuffer
//! together. Each iteration:
//! 1. pumps a bounded batch of events
//! 2. keeps the framebuffer sized to the surface
//! 3. runs every due cadence once
//! 4. presents the framebuffer, whether or not anything ticked

mod events;
mod loop_driver;

pub use events::{EventQueue, EventSource, LoopEvent};
pub use loop_driver::{
    CadenceId, IterationReport, LoopConfig, LoopControl, LoopDriver, TickCtx,
    DEFAULT_MAX_EVENTS_PER_ITERATION,
};
