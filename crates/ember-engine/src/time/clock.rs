use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::SystemTime;

use super::duration::{Duration, TimeUnit};
use super::instant::Instant;

/// Source of monotonic instants.
///
/// Every call to `now` returns an instant that is not earlier than any instant the
/// same clock returned before.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Process clock.
///
/// The UNIX-epoch offset is sampled once; after that only `std::time::Instant` is
/// consulted, so wall-clock adjustments cannot move time backwards.
#[derive(Debug, Copy, Clone, Default)]
pub struct MonotonicClock;

struct Anchor {
    epoch_ns: u64,
    base: std::time::Instant,
}

static ANCHOR: OnceLock<Anchor> = OnceLock::new();

fn anchor() -> &'static Anchor {
    ANCHOR.get_or_init(|| {
        let since_epoch = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_else(|e| panic!("system clock is set before the UNIX epoch: {e}"));
        Anchor {
            epoch_ns: u64::try_from(since_epoch.as_nanos()).unwrap_or(u64::MAX),
            base: std::time::Instant::now(),
        }
    })
}

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        let anchor = anchor();
        let elapsed = u64::try_from(anchor.base.elapsed().as_nanos()).unwrap_or(u64::MAX);
        Instant::of(
            anchor.epoch_ns.saturating_add(elapsed),
            TimeUnit::Nanoseconds,
        )
    }
}

/// Simulated clock that only moves when told to.
///
/// Clones share the same time value, so several tick limiters driven by one
/// `ManualClock` observe a single timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Creates a clock positioned at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now.get().nanosecond_value().saturating_add(by.nanosecond_value());
        self.now.set(Instant::of(next, TimeUnit::Nanoseconds));
    }

    /// Moves the clock to `to`. Earlier instants are ignored.
    pub fn set(&self, to: Instant) {
        if to < self.now.get() {
            log::debug!("ManualClock: ignoring backwards set to {to}");
            return;
        }
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
