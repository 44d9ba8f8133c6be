//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ IncubationService (domain)
//! ```
//!
//! Driven adapters (sensor, relays, event sinks, clock) implement these
//! traits.  The [`IncubationService`](super::service::IncubationService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::sensors::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per control tick.
pub trait SensorPort {
    /// Take a reading.  Never fails: a hardware failure is reported as a
    /// reading with `valid == false`.
    fn read(&mut self) -> Reading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  The domain only calls the setters on transitions, but
/// implementations must tolerate redundant calls.
pub trait ActuatorPort {
    fn set_heater(&mut self, on: bool);

    fn set_humidifier(&mut self, on: bool);

    /// De-energise every output (safe shutdown).
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Delivery is best-effort: a sink must swallow its own
/// failures so telemetry can never disturb control.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Fan one event out to two sinks.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic time since boot.
pub trait TimePort {
    fn now_ms(&self) -> u64;
}
