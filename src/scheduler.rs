//! Incubation stage scheduler.
//!
//! Converts elapsed cycle time into a day number and the humidity band for
//! that day.  The control loop feeds it the elapsed time every tick and
//! forwards whatever [`StageEvent`] comes back to the telemetry sink.
//!
//! ```text
//!   day 1 ─────────────── day K │ day K+1 ───── day N │ day > N
//!   ┌──────────────────────────┐ ┌──────────────────┐  ┌──────────┐
//!   │        Incubation        │─▶│     Lockdown     │─▶│ Complete │
//!   │      band [50, 55]       │ │   band [65, 75]  │  │ (latched)│
//!   └──────────────────────────┘ └──────────────────┘  └──────────┘
//!              ▲                                            │
//!              └──────────────────── reset() ───────────────┘
//! ```
//!
//! `day = floor(elapsed / day_duration) + 1`.  The day only ever moves
//! forward between resets and a change is reported once, on the first tick
//! that observes it.

use core::fmt;
use core::time::Duration;

use log::info;
use serde::Serialize;

use crate::config::IncubatorConfig;
use crate::control::Band;

// ═══════════════════════════════════════════════════════════════
//  Stage types
// ═══════════════════════════════════════════════════════════════

/// A contiguous day range with its own humidity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Days 1..=K.
    Incubation,
    /// Days K+1..=N.  The enclosure must stay closed.
    Lockdown,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incubation => write!(f, "incubation"),
            Self::Lockdown => write!(f, "lockdown"),
        }
    }
}

/// Boundary crossings reported by [`StageScheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageEvent {
    /// A new day started inside the current stage.
    DayAdvanced { day: u16, stage: Stage, band: Band },
    /// The first lockdown day started.
    LockdownStarted { day: u16, band: Band },
    /// The cycle ran past its last day.
    Completed { day: u16 },
}

/// Day layout of one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTable {
    pub incubation_band: Band,
    pub lockdown_band: Band,
    /// K: last incubation day.
    pub incubation_days: u16,
    /// N: last day of the cycle.
    pub total_days: u16,
    pub day_duration: Duration,
}

impl StageTable {
    pub fn from_config(config: &IncubatorConfig) -> Self {
        Self {
            incubation_band: config.incubation_band,
            lockdown_band: config.lockdown_band,
            incubation_days: config.incubation_days,
            total_days: config.total_days,
            day_duration: config.day_duration(),
        }
    }

    pub fn stage_for_day(&self, day: u16) -> Stage {
        if day <= self.incubation_days {
            Stage::Incubation
        } else {
            Stage::Lockdown
        }
    }

    pub fn band_for(&self, stage: Stage) -> Band {
        match stage {
            Stage::Incubation => self.incubation_band,
            Stage::Lockdown => self.lockdown_band,
        }
    }

    /// 1-based day number for an elapsed time, saturating at `u16::MAX`.
    pub fn day_at(&self, elapsed: Duration) -> u16 {
        let day_ms = self.day_duration.as_millis().max(1);
        let index = elapsed.as_millis() / day_ms;
        u16::try_from(index.saturating_add(1)).unwrap_or(u16::MAX)
    }
}

/// Scheduler state.  Created at cycle start, reset on restart, never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageState {
    /// Current 1-based day.
    pub day: u16,
    pub stage: Stage,
    pub target_band: Band,
    pub cycle_complete: bool,
}

impl StageState {
    fn initial(table: &StageTable) -> Self {
        Self {
            day: 1,
            stage: Stage::Incubation,
            target_band: table.incubation_band,
            cycle_complete: false,
        }
    }

    /// Whole days elapsed since cycle start.
    pub fn elapsed_days(&self) -> u16 {
        self.day - 1
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

pub struct StageScheduler {
    table: StageTable,
    state: StageState,
}

impl StageScheduler {
    pub fn new(config: &IncubatorConfig) -> Self {
        Self::with_table(StageTable::from_config(config))
    }

    pub fn with_table(table: StageTable) -> Self {
        Self {
            state: StageState::initial(&table),
            table,
        }
    }

    /// Advance to the day implied by `elapsed`.
    ///
    /// Returns `None` unless a day boundary was crossed since the previous
    /// call.  When one call crosses several boundaries only the most
    /// significant transition is reported; `Completed` outranks
    /// `LockdownStarted`, which outranks `DayAdvanced`.
    pub fn tick(&mut self, elapsed: Duration) -> Option<StageEvent> {
        if self.state.cycle_complete {
            return None;
        }

        let day = self.table.day_at(elapsed);
        if day <= self.state.day {
            return None;
        }
        self.state.day = day;

        if day > self.table.total_days {
            self.state.cycle_complete = true;
            self.state.stage = Stage::Lockdown;
            self.state.target_band = self.table.lockdown_band;
            info!("Scheduler: cycle complete (day {})", day);
            return Some(StageEvent::Completed { day });
        }

        let stage = self.table.stage_for_day(day);
        let band = self.table.band_for(stage);
        let stage_changed = stage != self.state.stage;
        self.state.stage = stage;
        self.state.target_band = band;

        if stage_changed {
            info!("Scheduler: lockdown started (day {}, band {})", day, band);
            Some(StageEvent::LockdownStarted { day, band })
        } else {
            info!("Scheduler: day {} ({}, band {})", day, stage, band);
            Some(StageEvent::DayAdvanced { day, stage, band })
        }
    }

    /// Back to day 1 of incubation.  Idempotent.
    ///
    /// Only the stage state is cleared; the elapsed time fed to [`tick`]
    /// is not re-anchored here.  Callers must restart their clock as well
    /// (`IncubationService::restart_cycle` does both), otherwise the next
    /// tick replays the old elapsed time from day 1.
    ///
    /// [`tick`]: Self::tick
    pub fn reset(&mut self) {
        self.state = StageState::initial(&self.table);
        info!("Scheduler: reset to day 1");
    }

    /// Humidity band for the current stage.  After completion the lockdown
    /// band stays in force.
    pub fn current_band(&self) -> Band {
        self.state.target_band
    }

    pub fn day(&self) -> u16 {
        self.state.day
    }

    pub fn elapsed_days(&self) -> u16 {
        self.state.elapsed_days()
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn is_complete(&self) -> bool {
        self.state.cycle_complete
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    /// Full days left after the current one.
    pub fn days_remaining(&self) -> u16 {
        self.table.total_days.saturating_sub(self.state.day)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
