use std::fmt;

use super::clock::Clock;
use super::instant::Instant;

/// Unit used to build and read back durations and instants.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
    ];

    /// Number of nanoseconds in one unit.
    #[inline]
    pub const fn nanoseconds_per_unit(self) -> u64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60_000_000_000,
            TimeUnit::Hours => 3_600_000_000_000,
        }
    }

    /// Saturates at `u64::MAX` (roughly 584 years).
    #[inline]
    pub const fn to_nanoseconds(self, value: u64) -> u64 {
        value.saturating_mul(self.nanoseconds_per_unit())
    }

    /// Integer division; sub-unit remainders are dropped.
    #[inline]
    pub const fn from_nanoseconds(self, nanos: u64) -> u64 {
        nanos / self.nanoseconds_per_unit()
    }
}

/// Non-negative elapsed time with nanosecond resolution.
///
/// Durations are never produced by signed subtraction: [`Duration::between`] takes the
/// absolute distance, so the argument order does not matter.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Duration {
    ns: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration { ns: 0 };

    /// Absolute distance between two instants.
    #[inline]
    pub const fn between(a: Instant, b: Instant) -> Self {
        let (a, b) = (a.nanosecond_value(), b.nanosecond_value());
        let ns = if a > b { a - b } else { b - a };
        Self { ns }
    }

    /// Time elapsed from `start` to the clock's current instant.
    #[inline]
    pub fn since<C: Clock + ?Sized>(start: Instant, clock: &C) -> Self {
        Self::between(start, clock.now())
    }

    #[inline]
    pub const fn of(value: u64, unit: TimeUnit) -> Self {
        Self {
            ns: unit.to_nanoseconds(value),
        }
    }

    #[inline]
    pub const fn nanosecond_value(self) -> u64 {
        self.ns
    }

    /// Duration expressed in `unit`, truncated toward zero.
    #[inline]
    pub const fn value(self, unit: TimeUnit) -> u64 {
        unit.from_nanoseconds(self.ns)
    }
}

impl From<Duration> for std::time::Duration {
    fn from(d: Duration) -> Self {
        std::time::Duration::from_nanos(d.ns)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.value(TimeUnit::Milliseconds))
    }
}
