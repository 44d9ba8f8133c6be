//! Climate sensing: the [`Reading`] type and the [`Hygrometer`] drivers
//! that produce it.
//!
//! A driver either yields a [`Measurement`] or a [`SensorError`].  The
//! hardware adapter folds that into a [`Reading`] whose `valid` flag is the
//! only thing the control core looks at; it never acts on an invalid one.

pub mod sht3x;
pub mod sim;

use crate::error::SensorError;

/// Plausible temperature range of the supported sensors (Celsius).
pub const TEMPERATURE_RANGE_C: (f32, f32) = (-40.0, 125.0);
/// Relative humidity range (%RH).
pub const HUMIDITY_RANGE_PCT: (f32, f32) = (0.0, 100.0);

/// Raw result of one successful measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Anything that can take a temperature/humidity measurement.
pub trait Hygrometer {
    fn measure(&mut self) -> Result<Measurement, SensorError>;
}

/// One control tick's worth of sensor data.  Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub valid: bool,
}

impl Reading {
    /// Build a reading, marking it invalid if either value is non-finite or
    /// outside the physical range.
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        let valid = in_range(temperature_c, TEMPERATURE_RANGE_C)
            && in_range(humidity_pct, HUMIDITY_RANGE_PCT);
        Self {
            temperature_c,
            humidity_pct,
            valid,
        }
    }

    /// The read failed outright.
    pub fn invalid() -> Self {
        Self {
            temperature_c: f32::NAN,
            humidity_pct: f32::NAN,
            valid: false,
        }
    }

    pub fn from_measurement(result: Result<Measurement, SensorError>) -> Self {
        match result {
            Ok(m) => Self::new(m.temperature_c, m.humidity_pct),
            Err(_) => Self::invalid(),
        }
    }
}

pub(crate) fn in_range(value: f32, (lo, hi): (f32, f32)) -> bool {
    value.is_finite() && value >= lo && value <= hi
}
