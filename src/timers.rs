//! Software interval timers for the main loop.
//!
//! Two independent gates run off the same monotonic millisecond source:
//!
//! ```text
//!   now_ms ──┬──▶ control   (2 s)  ──▶ IncubationService::tick()
//!            └──▶ telemetry (5 s)  ──▶ IncubationService::emit_status()
//! ```
//!
//! The incubation clock is a third, separate accumulation (see
//! [`IncubationClock`](crate::clock::IncubationClock)).

use crate::config::IncubatorConfig;

/// A periodic gate.  Fires at most once per `poll`.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

impl Interval {
    /// First fire at `first_due_ms`, then every `period_ms`.
    pub fn new(period_ms: u64, first_due_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due_ms: first_due_ms,
        }
    }

    /// Returns `true` if the interval elapsed.  Missed periods are not
    /// replayed: after a long stall the next deadline is one period out.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = self.next_due_ms.saturating_add(self.period_ms);
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms.saturating_add(self.period_ms);
        }
        true
    }

}

/// Which gates fired on one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Due {
    pub control: bool,
    pub telemetry: bool,
}

/// The control-tick and telemetry gates.
pub struct LoopTimers {
    control: Interval,
    telemetry: Interval,
}

impl LoopTimers {
    /// Control fires immediately at `start_ms`; telemetry one period later.
    pub fn new(config: &IncubatorConfig, start_ms: u64) -> Self {
        let telemetry_ms = u64::from(config.telemetry_interval_ms);
        Self {
            control: Interval::new(u64::from(config.control_interval_ms), start_ms),
            telemetry: Interval::new(telemetry_ms, start_ms.saturating_add(telemetry_ms)),
        }
    }

    pub fn poll(&mut self, now_ms: u64) -> Due {
        Due {
            control: self.control.poll(now_ms),
            telemetry: self.telemetry.poll(now_ms),
        }
    }
}
