//! Host-side simulated hygrometer.
//!
//! Values live in static atomics so a test harness or a simulation task
//! can inject them without holding a reference to the sensor.  Floats are
//! stored as their bit patterns.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::{Hygrometer, Measurement};
use crate::error::SensorError;

static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x4214_0000); // 37.0
static SIM_HUMIDITY_BITS: AtomicU32 = AtomicU32::new(0x424C_0000); // 51.0
static SIM_FAIL: AtomicBool = AtomicBool::new(false);

/// Inject the next measurement.
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// Make every read fail (or succeed again).
pub fn sim_set_failure(fail: bool) {
    SIM_FAIL.store(fail, Ordering::Relaxed);
}

/// Hygrometer backed by the injected values.
#[derive(Debug, Default)]
pub struct SimHygrometer;

impl SimHygrometer {
    pub fn new() -> Self {
        Self
    }
}

impl Hygrometer for SimHygrometer {
    fn measure(&mut self) -> Result<Measurement, SensorError> {
        if SIM_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::Bus);
        }
        Ok(Measurement {
            temperature_c: f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUMIDITY_BITS.load(Ordering::Relaxed)),
        })
    }
}
