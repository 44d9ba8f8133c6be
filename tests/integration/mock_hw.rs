//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers.

use incubator::app::events::AppEvent;
use incubator::app::ports::{ActuatorPort, EventSink, SensorPort};
use incubator::sensors::Reading;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Heater(bool),
    Humidifier(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

/// Returns whatever reading the test last injected.
pub struct MockHardware {
    pub reading: Reading,
    pub reads: u32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            reading: Reading::new(temperature_c, humidity_pct),
            reads: 0,
            calls: Vec::new(),
        }
    }

    pub fn set_climate(&mut self, temperature_c: f32, humidity_pct: f32) {
        self.reading = Reading::new(temperature_c, humidity_pct);
    }

    pub fn fail_reads(&mut self) {
        self.reading = Reading::invalid();
    }

    pub fn heater_calls(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Heater(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn humidifier_calls(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Humidifier(on) => Some(*on),
                _ => None,
            })
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn read(&mut self) -> Reading {
        self.reads += 1;
        self.reading
    }
}

impl ActuatorPort for MockHardware {
    fn set_heater(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Heater(on));
    }

    fn set_humidifier(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Humidifier(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand back everything recorded so far and start fresh.
    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
