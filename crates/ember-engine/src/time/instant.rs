use std::fmt;

use super::duration::TimeUnit;

/// Opaque monotonic timestamp.
///
/// Stored as nanoseconds since [`Instant::UNIX_EPOCH`]. Only the distance between two
/// instants carries meaning; use [`Duration::between`](super::Duration::between) to
/// measure it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Instant {
    epoch_ns: u64,
}

impl Instant {
    /// Designated origin. Also used as the "never happened" sentinel.
    pub const UNIX_EPOCH: Instant = Instant { epoch_ns: 0 };

    /// Creates an instant `value` units after the epoch.
    #[inline]
    pub const fn of(value: u64, unit: TimeUnit) -> Self {
        Self {
            epoch_ns: unit.to_nanoseconds(value),
        }
    }

    #[inline]
    pub const fn nanosecond_value(self) -> u64 {
        self.epoch_ns
    }

    /// Time since the epoch in `unit`, truncated.
    #[inline]
    pub const fn value(self, unit: TimeUnit) -> u64 {
        unit.from_nanoseconds(self.epoch_ns)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.epoch_ns)
    }
}
