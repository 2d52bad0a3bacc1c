//! Time subsystem.
//!
//! Provides the monotonic clock, duration arithmetic and tick-rate limiting used by
//! the loop driver. Intended usage:
//! - one `TickLimiter` per cadence (simulation update, render, ...)
//! - share a single `Clock` value between limiters by cloning it

mod clock;
mod duration;
mod instant;
mod stopwatch;
mod tick_limiter;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use duration::{Duration, TimeUnit};
pub use instant::Instant;
pub use stopwatch::Stopwatch;
pub use tick_limiter::TickLimiter;
