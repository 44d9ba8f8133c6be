//! System configuration parameters
//!
//! All tunable parameters for the incubator.  Defaults describe a standard
//! 21-day chicken-egg cycle.  A JSON override blob (e.g. provisioned at
//! build time) may replace them; either way the result is validated before
//! the control core is constructed.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::control::Band;
use crate::error::ConfigError;

/// Upper bound for `total_days`, one leap year.
pub const MAX_TOTAL_DAYS: u16 = 366;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncubatorConfig {
    // --- Temperature ---
    /// Heater setpoint in Celsius
    pub target_temperature_c: f32,
    /// Dead-zone half-width around the setpoint (Celsius)
    pub temperature_tolerance_c: f32,

    // --- Humidity ---
    /// Extra margin applied outside each stage band (%RH)
    pub humidity_tolerance_pct: f32,
    /// Relative humidity band for the incubation stage
    pub incubation_band: Band,
    /// Relative humidity band for lockdown
    pub lockdown_band: Band,

    // --- Cycle ---
    /// Last day (inclusive) of the incubation stage
    pub incubation_days: u16,
    /// Total cycle length in days; lockdown runs from incubation_days + 1
    pub total_days: u16,
    /// Length of one cycle day in seconds (shortened for bench testing)
    pub day_duration_secs: u32,

    // --- Timing ---
    /// Sensor read / control tick interval (milliseconds)
    pub control_interval_ms: u32,
    /// Status snapshot interval (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for IncubatorConfig {
    fn default() -> Self {
        Self {
            // Temperature
            target_temperature_c: 37.5,
            temperature_tolerance_c: 0.5,

            // Humidity
            humidity_tolerance_pct: 2.0,
            incubation_band: Band::from_const(50.0, 55.0),
            lockdown_band: Band::from_const(65.0, 75.0),

            // Cycle
            incubation_days: 18,
            total_days: 21,
            day_duration_secs: 86_400,

            // Timing
            control_interval_ms: 2_000,   // 0.5 Hz
            telemetry_interval_ms: 5_000, // 0.2 Hz
        }
    }
}

impl IncubatorConfig {
    /// Parse a JSON override.  Missing fields fall back to defaults; the
    /// merged result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(20.0..=45.0).contains(&self.target_temperature_c) {
            return Err(ConfigError::ValidationFailed(
                "target_temperature_c must be 20.0–45.0",
            ));
        }
        if !(0.0..=5.0).contains(&self.temperature_tolerance_c) {
            return Err(ConfigError::ValidationFailed(
                "temperature_tolerance_c must be 0.0–5.0",
            ));
        }
        if !(0.0..=20.0).contains(&self.humidity_tolerance_pct) {
            return Err(ConfigError::ValidationFailed(
                "humidity_tolerance_pct must be 0.0–20.0",
            ));
        }
        validate_humidity_band(
            self.incubation_band,
            "incubation_band must satisfy 0 <= min < max <= 100",
        )?;
        validate_humidity_band(
            self.lockdown_band,
            "lockdown_band must satisfy 0 <= min < max <= 100",
        )?;
        if self.incubation_days == 0 {
            return Err(ConfigError::ValidationFailed(
                "incubation_days must be at least 1",
            ));
        }
        if self.total_days <= self.incubation_days {
            return Err(ConfigError::ValidationFailed(
                "total_days must exceed incubation_days",
            ));
        }
        if self.total_days > MAX_TOTAL_DAYS {
            return Err(ConfigError::ValidationFailed(
                "total_days must not exceed 366",
            ));
        }
        if self.day_duration_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "day_duration_secs must be non-zero",
            ));
        }
        if self.control_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_interval_ms must be non-zero",
            ));
        }
        if self.telemetry_interval_ms < self.control_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_ms must not be shorter than control_interval_ms",
            ));
        }
        Ok(())
    }

    pub fn day_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.day_duration_secs))
    }
}

fn validate_humidity_band(band: Band, msg: &'static str) -> Result<(), ConfigError> {
    if band.is_valid() && band.min() >= 0.0 && band.max() <= 100.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(msg))
    }
}
