//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the hygrometer and both relays, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  Relay write failures are logged
//! here and never reach the domain.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::Relay;
use crate::sensors::{Hygrometer, Reading};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, H, U> {
    sensor: S,
    heater: Relay<H>,
    humidifier: Relay<U>,
}

impl<S, H, U> HardwareAdapter<S, H, U>
where
    S: Hygrometer,
    H: OutputPin,
    U: OutputPin,
{
    pub fn new(sensor: S, heater: Relay<H>, humidifier: Relay<U>) -> Self {
        Self {
            sensor,
            heater,
            humidifier,
        }
    }

    pub fn heater(&self) -> &Relay<H> {
        &self.heater
    }

    pub fn humidifier(&self) -> &Relay<U> {
        &self.humidifier
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S, H, U> SensorPort for HardwareAdapter<S, H, U>
where
    S: Hygrometer,
    H: OutputPin,
    U: OutputPin,
{
    fn read(&mut self) -> Reading {
        let reading = Reading::from_measurement(self.sensor.measure());
        if !reading.valid && reading.temperature_c.is_finite() {
            warn!(
                "Implausible reading discarded: {:.1}°C {:.1}%RH",
                reading.temperature_c, reading.humidity_pct
            );
        }
        reading
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, H, U> ActuatorPort for HardwareAdapter<S, H, U>
where
    S: Hygrometer,
    H: OutputPin,
    U: OutputPin,
{
    fn set_heater(&mut self, on: bool) {
        if let Err(e) = self.heater.set(on) {
            warn!("{}", e);
        }
    }

    fn set_humidifier(&mut self, on: bool) {
        if let Err(e) = self.humidifier.set(on) {
            warn!("{}", e);
        }
    }

    fn all_off(&mut self) {
        self.set_heater(false);
        self.set_humidifier(false);
    }
}
