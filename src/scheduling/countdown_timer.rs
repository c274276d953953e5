use std::time::Duration;

/// Splits a stream of frame deltas into whole countdown periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    accumulated: Duration,
}

impl CountdownTimer {
    /// Length of one countdown decrement.
    pub const PERIOD: Duration = Duration::from_secs(1);

    pub fn new() -> Self { Self::default() }

    /// Adds `elapsed` and returns the number of full periods that completed.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut periods = 0;
        while self.accumulated >= Self::PERIOD {
            self.accumulated -= Self::PERIOD;
            periods += 1;
        }
        periods
    }

    /// Drops any partially elapsed period.
    pub fn clear(&mut self) { self.accumulated = Duration::ZERO; }

    /// Time left until the next period completes.
    pub fn until_next(&self) -> Duration { Self::PERIOD - self.accumulated }
}
