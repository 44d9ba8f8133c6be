//! Incubation clock: elapsed cycle time anchored at the cycle start.
//!
//! The clock never reads hardware itself; the loop injects "now" (time
//! since boot from [`TimePort`](crate::app::ports::TimePort)).  Elapsed time
//! is non-decreasing between restarts even if a caller hands in a stale
//! timestamp.

use core::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct IncubationClock {
    anchor: Duration,
    last: Duration,
}

impl IncubationClock {
    /// Start a cycle at `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            anchor: now,
            last: Duration::ZERO,
        }
    }

    /// Elapsed cycle time observed at `now`.
    pub fn elapsed(&mut self, now: Duration) -> Duration {
        let e = now.saturating_sub(self.anchor);
        if e > self.last {
            self.last = e;
        }
        self.last
    }

    /// Last value returned by [`elapsed`](Self::elapsed).
    pub fn current(&self) -> Duration {
        self.last
    }

    /// Re-anchor the cycle at `now`.
    pub fn restart(&mut self, now: Duration) {
        self.anchor = now;
        self.last = Duration::ZERO;
    }
}
