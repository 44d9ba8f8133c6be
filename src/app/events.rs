//! Outbound application events.
//!
//! The [`IncubationService`](super::service::IncubationService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  They carry typed
//! fields only; turning them into text or JSON is left to the adapters on
//! the other side.

use serde::Serialize;

use crate::control::Band;
use crate::remote::ResetSource;
use crate::scheduler::{Stage, StageEvent};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum AppEvent {
    /// The service has started (carries the initial stage).
    Started { day: u16, stage: Stage, band: Band },

    /// The sensor read failed; this tick was skipped.
    SensorError { consecutive: u32 },

    /// The stage scheduler crossed a day boundary.
    Stage(StageEvent),

    /// The heater relay was switched.
    HeaterChanged { on: bool },

    /// The humidifier relay was switched.
    HumidifierChanged { on: bool },

    /// The incubation timer was restarted.
    TimerReset { source: ResetSource },

    /// Periodic consolidated snapshot.
    Status(StatusSnapshot),
}

/// A point-in-time status snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    /// Last valid temperature, if any reading succeeded yet.
    pub temperature_c: Option<f32>,
    /// Last valid humidity, if any reading succeeded yet.
    pub humidity_pct: Option<f32>,
    pub heater_on: bool,
    pub humidifier_on: bool,
    pub day: u16,
    pub stage: Stage,
    pub humidity_band: Band,
    pub target_temperature_c: f32,
    pub elapsed_secs: u64,
    pub days_remaining: u16,
    pub cycle_complete: bool,
    /// Consecutive failed reads (0 when the last read succeeded).
    pub sensor_failures: u32,
}
