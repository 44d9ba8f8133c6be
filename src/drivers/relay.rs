//! Relay output driver (heater, humidifier).
//!
//! A relay is a dumb on/off actuator behind one GPIO.  Most opto-isolated
//! relay boards are active-low, so the polarity is configurable.
//!
//! ## Dual-target design
//!
//! Generic over `embedded-hal` [`OutputPin`]: `PinDriver` on ESP-IDF, an
//! in-memory pin in host tests.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// GPIO high energises the relay.
    ActiveHigh,
    /// GPIO low energises the relay.
    ActiveLow,
}

pub struct Relay<P> {
    pin: P,
    polarity: Polarity,
    name: &'static str,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Wrap `pin` and drive it to the de-energised level.
    pub fn new(pin: P, polarity: Polarity, name: &'static str) -> Self {
        let mut relay = Self {
            pin,
            polarity,
            name,
            on: false,
        };
        if let Err(e) = relay.set(false) {
            warn!("Relay {}: initial off failed: {}", name, e);
        }
        relay
    }

    /// Drive the output.  Always writes the pin, so redundant calls are
    /// harmless.  The remembered state only changes on success.
    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::PinWriteFailed(self.name))?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}
