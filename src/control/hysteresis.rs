//! Dual-threshold (bang-bang) controller for one binary actuator.
//!
//! Both regulated variables use the same convention: the tolerance widens
//! the target outward.
//!
//! ```text
//!        TurnOn            dead zone (NoChange)            TurnOff
//!   ◀────────────┤  min-tol ··· [min ······· max] ··· max+tol  ├────────────▶
//! ```
//!
//! The heater regulates around a point setpoint (`target ± tol`), the
//! humidifier around the stage band (`[min - tol, max + tol]`).  Commands
//! are edge-triggered: the controller remembers what it last commanded and
//! only returns `TurnOn`/`TurnOff` when that actually changes.

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ═══════════════════════════════════════════════════════════════
//  Band
// ═══════════════════════════════════════════════════════════════

/// Inclusive target range.  Invariant: `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    min: f32,
    max: f32,
}

impl Band {
    /// Build a band, rejecting `min >= max` and non-finite bounds.
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        let band = Self { min, max };
        if band.is_valid() {
            Ok(band)
        } else {
            Err(ConfigError::ValidationFailed("band requires finite min < max"))
        }
    }

    /// Unchecked constructor for compile-time defaults.
    pub(crate) const fn from_const(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }


    /// Deserialized bands bypass [`Band::new`]; config validation calls this.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}]", self.min, self.max)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Thresholds
// ═══════════════════════════════════════════════════════════════

/// The two switching points actually compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Values strictly below this switch the actuator on.
    pub on_below: f32,
    /// Values strictly above this switch the actuator off.
    pub off_above: f32,
}

impl Thresholds {
    /// `[band.min - tolerance, band.max + tolerance]`.
    pub fn widened(band: Band, tolerance: f32) -> Self {
        let tol = sanitize_tolerance(tolerance);
        Self {
            on_below: band.min - tol,
            off_above: band.max + tol,
        }
    }

    /// `target ± tolerance`.
    pub fn around(target: f32, tolerance: f32) -> Self {
        let tol = sanitize_tolerance(tolerance);
        Self {
            on_below: target - tol,
            off_above: target + tol,
        }
    }
}

// Negative or NaN tolerance would invert the dead zone and cause chatter.
fn sanitize_tolerance(tolerance: f32) -> f32 {
    tolerance.max(0.0)
}

// ═══════════════════════════════════════════════════════════════
//  Controller
// ═══════════════════════════════════════════════════════════════

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActuatorCommand {
    TurnOn,
    TurnOff,
    NoChange,
}

impl ActuatorCommand {
    /// The output level to apply, or `None` when nothing should be written.
    pub fn target_state(self) -> Option<bool> {
        match self {
            Self::TurnOn => Some(true),
            Self::TurnOff => Some(false),
            Self::NoChange => None,
        }
    }
}

/// Hysteresis controller for a single actuator.
///
/// Owns the actuator's [`ControlState`]; the flag is only flipped when a
/// command is issued.
#[derive(Debug, Clone)]
pub struct HysteresisController {
    label: &'static str,
    state: ControlState,
}

/// Last commanded output of one controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub active: bool,
}

impl HysteresisController {
    /// New controller, actuator assumed off.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            state: ControlState::default(),
        }
    }

    /// Evaluate `current` against `band` widened by `tolerance`.
    pub fn evaluate(&mut self, current: f32, band: Band, tolerance: f32) -> ActuatorCommand {
        self.evaluate_thresholds(current, Thresholds::widened(band, tolerance))
    }

    /// Evaluate against explicit switching points.
    ///
    /// Non-finite input never switches anything.
    pub fn evaluate_thresholds(&mut self, current: f32, t: Thresholds) -> ActuatorCommand {
        if !current.is_finite() {
            return ActuatorCommand::NoChange;
        }

        if !self.state.active && current < t.on_below {
            self.state.active = true;
            debug!("{}: ON ({:.2} < {:.2})", self.label, current, t.on_below);
            ActuatorCommand::TurnOn
        } else if self.state.active && current > t.off_above {
            self.state.active = false;
            debug!("{}: OFF ({:.2} > {:.2})", self.label, current, t.off_above);
            ActuatorCommand::TurnOff
        } else {
            ActuatorCommand::NoChange
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn state(&self) -> ControlState {
        self.state
    }


    /// Mark the actuator off (shutdown path).  Returns whether it was on.
    pub fn force_off(&mut self) -> bool {
        core::mem::replace(&mut self.state.active, false)
    }
}
