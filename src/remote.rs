//! Cycle-restart requests arriving from outside the control loop.
//!
//! A remote dashboard button, the on-board BOOT button or a console command
//! may ask for the incubation timer to be restarted at any time.  Requests
//! land in an `embassy-sync` [`Signal`] and the main loop drains it between
//! control ticks, so a restart never interleaves with a scheduler tick.
//!
//! ```text
//! ┌──────────────┐  request()   ┌──────────────┐  take()   ┌──────────────┐
//! │ Remote / BTN │─────────────▶│ ResetTrigger │──────────▶│  Main Loop   │
//! └──────────────┘              └──────────────┘           └──────────────┘
//! ```
//!
//! Several requests before the next drain collapse into one restart.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use serde::Serialize;

/// Who asked for the restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetSource {
    /// Dashboard / network command.
    Remote,
    /// Physical push button.
    Button,
    /// Serial console.
    Console,
}

/// Single-slot mailbox for restart requests.
pub struct ResetTrigger {
    signal: Signal<CriticalSectionRawMutex, ResetSource>,
}

impl ResetTrigger {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Post a request.  Safe from any task; overwrites an unconsumed one.
    pub fn request(&self, source: ResetSource) {
        self.signal.signal(source);
    }

    /// Consume the pending request, if any.
    pub fn take(&self) -> Option<ResetSource> {
        self.signal.try_take()
    }

    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl Default for ResetTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide trigger shared by the input adapters and the main loop.
pub static REMOTE_RESET: ResetTrigger = ResetTrigger::new();

/// Post a restart request to [`REMOTE_RESET`].
pub fn request_reset(source: ResetSource) {
    REMOTE_RESET.request(source);
}

/// Consume a pending request from [`REMOTE_RESET`].
pub fn take_reset_request() -> Option<ResetSource> {
    REMOTE_RESET.take()
}
