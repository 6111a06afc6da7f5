//! Fixed-timestep pacing for automatic stepping.
//!
//! Elapsed wall-clock time is accumulated; every full period in the
//! accumulator is one generation due. A late tick therefore fires several
//! catch-up generations instead of drifting behind the target rate.

use std::time::Duration;

/// Accumulator that converts elapsed time into a number of due steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    period: Duration,
    accumulator: Duration,
    max_catch_up: Option<u32>,
}

impl FixedTimestep {
    /// Create a timestep firing `steps_per_second` times per second.
    ///
    /// A rate of zero is treated as one step per second; configuration
    /// validation rejects it before it gets here.
    pub fn new(steps_per_second: u32) -> Self {
        let rate = steps_per_second.max(1);
        Self {
            period: (Duration::from_secs(1) / rate).max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
            max_catch_up: None,
        }
    }

    /// Limit how many steps a single tick may fire. Backlog past the limit is dropped.
    pub fn with_max_catch_up(mut self, max_steps: Option<u32>) -> Self {
        self.max_catch_up = max_steps.map(|n| n.max(1));
        self
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time currently banked towards the next step.
    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    /// Add `elapsed` to the accumulator and return how many steps are due.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut due = 0u32;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            due += 1;

            if self.max_catch_up.is_some_and(|max| due >= max) {
                let period_ns = self.period.as_nanos();
                let backlog_ns = self.accumulator.as_nanos();
                if backlog_ns >= period_ns {
                    log::warn!(
                        "Dropping {} steps of backlog after {} catch-up steps",
                        backlog_ns / period_ns,
                        due
                    );
                }
                self.accumulator = Duration::from_nanos((backlog_ns % period_ns) as u64);
                break;
            }
        }

        if due > 1 {
            log::debug!("Catching up {} steps in one tick", due);
        }
        due
    }

    /// Time left until the next step becomes due.
    pub fn until_next_step(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }

    /// Discard any banked time.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_rate() {
        assert_eq!(FixedTimestep::new(4).period(), Duration::from_millis(250));
        assert_eq!(FixedTimestep::new(0).period(), Duration::from_secs(1));
    }

    #[test]
    fn test_no_step_before_period() {
        let mut ts = FixedTimestep::new(10);
        assert_eq!(ts.accumulate(Duration::from_millis(99)), 0);
        assert_eq!(ts.until_next_step(), Duration::from_millis(1));
        assert_eq!(ts.accumulate(Duration::from_millis(1)), 1);
        assert_eq!(ts.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_catch_up_fires_multiple_steps() {
        let mut ts = FixedTimestep::new(10);
        assert_eq!(ts.accumulate(Duration::from_millis(350)), 3);
        assert_eq!(ts.accumulated(), Duration::from_millis(50));
    }

    #[test]
    fn test_catch_up_clamp_drops_backlog() {
        let mut ts = FixedTimestep::new(10).with_max_catch_up(Some(2));
        assert_eq!(ts.accumulate(Duration::from_millis(1050)), 2);
        // Only the partial period survives the clamp.
        assert_eq!(ts.accumulated(), Duration::from_millis(50));
        assert_eq!(ts.accumulate(Duration::from_millis(50)), 1);
    }

    #[test]
    fn test_reset() {
        let mut ts = FixedTimestep::new(10);
        ts.accumulate(Duration::from_millis(90));
        ts.reset();
        assert_eq!(ts.accumulate(Duration::from_millis(90)), 0);
    }
}
