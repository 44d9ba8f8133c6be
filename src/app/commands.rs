//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (dashboard,
//! push button, serial console) that the
//! [`IncubationService`](super::service::IncubationService) interprets.

use crate::remote::ResetSource;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Restart the incubation timer at day 1.  Actuators are left alone and
    /// re-converge on the next control tick.
    RestartCycle(ResetSource),

    /// Emit a status snapshot now instead of waiting for the telemetry timer.
    EmitStatus,
}
