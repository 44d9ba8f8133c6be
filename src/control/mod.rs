//! Closed-loop control primitives.

pub mod hysteresis;

pub use hysteresis::{ActuatorCommand, Band, ControlState, HysteresisController, Thresholds};
