use anyhow::{ensure, Result};

use super::clock::{Clock, MonotonicClock};
use super::duration::{Duration, TimeUnit};
use super::instant::Instant;

/// Rate limiter for a single cadence.
///
/// Two states:
/// - idle: less than `target` has elapsed since the last tick
/// - due: at least `target` has elapsed
///
/// `should_tick` only observes the state; `tick` is the only transition (due -> idle).
/// A caller that checks late gets one tick, not a backlog: the extra time simply shows
/// up in the next `time_from_last_tick`.
///
/// A fresh limiter has never ticked; its elapsed time is measured from the epoch, so it
/// is due on the first check when driven by a real clock.
#[derive(Debug, Clone)]
pub struct TickLimiter<C: Clock = MonotonicClock> {
    target: Duration,
    last_tick: Option<Instant>,
    clock: C,
}

impl<C: Clock> TickLimiter<C> {
    /// Creates a limiter whose minimum inter-tick time is `1s / ticks_per_second`
    /// (integer division, so 30 Hz becomes 33_333_333ns).
    pub fn new(ticks_per_second: u64, clock: C) -> Result<Self> {
        ensure!(ticks_per_second > 0, "tick rate must be positive");
        let target = TimeUnit::Seconds.to_nanoseconds(1) / ticks_per_second;
        Ok(Self::with_target(
            Duration::of(target, TimeUnit::Nanoseconds),
            clock,
        ))
    }

    pub fn with_target(target: Duration, clock: C) -> Self {
        Self {
            target,
            last_tick: None,
            clock,
        }
    }

    #[inline]
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Instant of the most recent tick, `None` before the first one.
    #[inline]
    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    #[inline]
    pub fn has_ticked(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Whether at least `target` has elapsed since the last tick.
    pub fn should_tick(&self) -> bool {
        self.time_from_last_tick() >= self.target
    }

    /// Elapsed time since the last tick, whether or not the limiter is due.
    pub fn time_from_last_tick(&self) -> Duration {
        Duration::since(self.last_tick.unwrap_or(Instant::UNIX_EPOCH), &self.clock)
    }

    /// Records a tick at the current instant.
    pub fn tick(&mut self) {
        self.last_tick = Some(self.clock.now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn ms(v: u64) -> Duration {
        Duration::of(v, TimeUnit::Milliseconds)
    }

    /// Limiter on a manual clock that has already ticked once at t=1s.
    fn primed(rate: u64) -> (TickLimiter<ManualClock>, ManualClock) {
        let clock = ManualClock::starting_at(Instant::of(1, TimeUnit::Seconds));
        let mut limiter = TickLimiter::new(rate, clock.clone()).unwrap();
        limiter.tick();
        (limiter, clock)
    }

    #[test]
    fn target_uses_integer_division() {
        let limiter = TickLimiter::new(30, ManualClock::default()).unwrap();
        assert_eq!(limiter.target().nanosecond_value(), 33_333_333);

        let limiter = TickLimiter::new(7, ManualClock::default()).unwrap();
        assert_eq!(limiter.target().nanosecond_value(), 142_857_142);
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert!(TickLimiter::new(0, ManualClock::default()).is_err());
    }

    #[test]
    fn fresh_limiter_is_due_once_clock_is_past_target() {
        let clock = ManualClock::starting_at(Instant::of(5, TimeUnit::Seconds));
        let limiter = TickLimiter::new(60, clock).unwrap();
        assert!(!limiter.has_ticked());
        assert!(limiter.should_tick());
    }

    #[test]
    fn tick_at_epoch_counts_as_ticked() {
        let clock = ManualClock::default();
        let mut limiter = TickLimiter::new(30, clock.clone()).unwrap();
        limiter.tick();

        assert!(limiter.has_ticked());
        assert_eq!(limiter.last_tick(), Some(Instant::UNIX_EPOCH));
        assert!(!limiter.should_tick());

        clock.advance(ms(34));
        assert!(limiter.should_tick());
    }

    #[test]
    fn thirty_hz_needs_a_full_period() {
        let (mut limiter, clock) = primed(30);

        clock.advance(ms(33));
        assert!(!limiter.should_tick(), "33ms is shorter than 1/30s");

        clock.advance(ms(1));
        assert!(limiter.should_tick());
        assert_eq!(limiter.time_from_last_tick(), ms(34));

        limiter.tick();
        assert!(!limiter.should_tick());
        assert_eq!(limiter.time_from_last_tick(), Duration::ZERO);
    }

    #[test]
    fn exact_target_is_due() {
        let (limiter, clock) = primed(4);
        clock.advance(ms(250));
        assert!(limiter.should_tick());
    }

    #[test]
    fn should_tick_does_not_mutate() {
        let (limiter, clock) = primed(10);
        clock.advance(ms(150));
        let before = limiter.last_tick();
        assert!(limiter.should_tick());
        assert!(limiter.should_tick());
        assert_eq!(limiter.last_tick(), before);
    }

    #[test]
    fn late_check_yields_single_tick_without_backlog() {
        let (mut limiter, clock) = primed(100);

        // Ten periods pass unobserved.
        clock.advance(ms(100));
        assert!(limiter.should_tick());
        assert_eq!(limiter.time_from_last_tick(), ms(100));

        limiter.tick();
        assert!(!limiter.should_tick());
    }

    #[test]
    fn elapsed_is_reported_while_idle() {
        let (limiter, clock) = primed(1);
        clock.advance(ms(400));
        assert!(!limiter.should_tick());
        assert_eq!(limiter.time_from_last_tick(), ms(400));
    }

    #[test]
    fn limiters_on_shared_clock_are_independent() {
        let clock = ManualClock::starting_at(Instant::of(1, TimeUnit::Seconds));
        let mut fast = TickLimiter::new(100, clock.clone()).unwrap();
        let mut slow = TickLimiter::new(10, clock.clone()).unwrap();
        fast.tick();
        slow.tick();

        clock.advance(ms(10));
        assert!(fast.should_tick());
        assert!(!slow.should_tick());
        fast.tick();

        clock.advance(ms(90));
        assert!(fast.should_tick());
        assert!(slow.should_tick());
    }
}
