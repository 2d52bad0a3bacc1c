use super::clock::{Clock, MonotonicClock};
use super::duration::Duration;
use super::instant::Instant;

/// Measures time elapsed since it was started.
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    start: Instant,
    clock: C,
}

impl<C: Clock> Stopwatch<C> {
    pub fn start_with(clock: C) -> Self {
        Self {
            start: clock.now(),
            clock,
        }
    }

    /// Time since start. Does not reset the stopwatch.
    pub fn split(&self) -> Duration {
        Duration::since(self.start, &self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ManualClock, TimeUnit};

    #[test]
    fn split_reports_elapsed_without_resetting() {
        let clock = ManualClock::default();
        let watch = Stopwatch::start_with(clock.clone());

        clock.advance(Duration::of(3, TimeUnit::Milliseconds));
        assert_eq!(watch.split(), Duration::of(3, TimeUnit::Milliseconds));

        clock.advance(Duration::of(2, TimeUnit::Milliseconds));
        assert_eq!(watch.split(), Duration::of(5, TimeUnit::Milliseconds));
    }
}
