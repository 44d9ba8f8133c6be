//! Application service, the hexagonal core.
//!
//! [`IncubationService`] owns both hysteresis controllers, the stage
//! scheduler and the incubation clock.  All I/O flows through port traits
//! injected at call sites, and "now" is passed in by the caller, so the
//! whole service is testable with mock adapters and no real delays.
//!
//! ```text
//!  SensorPort ──▶ ┌───────────────────────────────┐ ──▶ EventSink
//!                 │       IncubationService       │
//! ActuatorPort ◀──│ Scheduler · Heater · Humidity │
//!                 └───────────────────────────────┘
//! ```

use core::time::Duration;

use log::{info, warn};

use crate::clock::IncubationClock;
use crate::config::IncubatorConfig;
use crate::control::{HysteresisController, Thresholds};
use crate::error::ConfigError;
use crate::remote::ResetSource;
use crate::scheduler::{StageScheduler, StageState};
use crate::sensors::Reading;

use super::commands::AppCommand;
use super::events::{AppEvent, StatusSnapshot};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// IncubationService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct IncubationService {
    config: IncubatorConfig,
    scheduler: StageScheduler,
    clock: IncubationClock,
    heater: HysteresisController,
    humidifier: HysteresisController,
    /// Most recent valid reading (for status snapshots).
    last_reading: Option<Reading>,
    /// Consecutive failed sensor reads.
    sensor_failures: u32,
    tick_count: u64,
}

impl IncubationService {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** start the cycle clock; call [`start`](Self::start) next.
    pub fn new(config: IncubatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = StageScheduler::new(&config);
        Ok(Self {
            config,
            scheduler,
            clock: IncubationClock::new(Duration::ZERO),
            heater: HysteresisController::new("heater"),
            humidifier: HysteresisController::new("humidifier"),
            last_reading: None,
            sensor_failures: 0,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Anchor day 1 at `now`.
    pub fn start(&mut self, now: Duration, sink: &mut impl EventSink) {
        self.clock.restart(now);
        self.scheduler.reset();
        let state = self.scheduler.state();
        sink.emit(&AppEvent::Started {
            day: state.day,
            stage: state.stage,
            band: state.target_band,
        });
        info!(
            "IncubationService started: day {} ({}), {} days total",
            state.day, state.stage, self.config.total_days
        );
    }

    /// De-energise both outputs.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort) {
        self.heater.force_off();
        self.humidifier.force_off();
        hw.all_off();
        info!("IncubationService: all outputs off");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read → schedule → heater → humidifier.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now: Duration,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Read; never act on an invalid sample.
        let reading = hw.read();
        if !reading.valid {
            self.sensor_failures = self.sensor_failures.saturating_add(1);
            warn!(
                "Sensor read failed ({} in a row), holding outputs",
                self.sensor_failures
            );
            sink.emit(&AppEvent::SensorError {
                consecutive: self.sensor_failures,
            });
            return;
        }
        if self.sensor_failures > 0 {
            info!("Sensor recovered after {} failed reads", self.sensor_failures);
        }
        self.sensor_failures = 0;
        self.last_reading = Some(reading);

        // 2. Stage scheduling
        let elapsed = self.clock.elapsed(now);
        if let Some(event) = self.scheduler.tick(elapsed) {
            sink.emit(&AppEvent::Stage(event));
        }

        // 3. Heater around the fixed setpoint
        let t = Thresholds::around(
            self.config.target_temperature_c,
            self.config.temperature_tolerance_c,
        );
        let cmd = self.heater.evaluate_thresholds(reading.temperature_c, t);
        if let Some(on) = cmd.target_state() {
            hw.set_heater(on);
            sink.emit(&AppEvent::HeaterChanged { on });
        }

        // 4. Humidifier against the stage band
        let cmd = self.humidifier.evaluate(
            reading.humidity_pct,
            self.scheduler.current_band(),
            self.config.humidity_tolerance_pct,
        );
        if let Some(on) = cmd.target_state() {
            hw.set_humidifier(on);
            sink.emit(&AppEvent::HumidifierChanged { on });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.  Call between ticks only.
    pub fn handle_command(&mut self, cmd: AppCommand, now: Duration, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::RestartCycle(source) => self.restart_cycle(now, source, sink),
            AppCommand::EmitStatus => self.emit_status(sink),
        }
    }

    /// Back to day 1 with the clock re-anchored at `now`.  Outputs are not
    /// touched; they re-converge on the next tick.
    pub fn restart_cycle(&mut self, now: Duration, source: ResetSource, sink: &mut impl EventSink) {
        self.scheduler.reset();
        self.clock.restart(now);
        info!("Incubation timer restarted ({:?})", source);
        sink.emit(&AppEvent::TimerReset { source });
    }

    /// Emit a consolidated [`StatusSnapshot`].
    pub fn emit_status(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Status(self.build_status()));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot from the current state.
    pub fn build_status(&self) -> StatusSnapshot {
        let stage = self.scheduler.state();
        StatusSnapshot {
            temperature_c: self.last_reading.map(|r| r.temperature_c),
            humidity_pct: self.last_reading.map(|r| r.humidity_pct),
            heater_on: self.heater.is_active(),
            humidifier_on: self.humidifier.is_active(),
            day: stage.day,
            stage: stage.stage,
            humidity_band: stage.target_band,
            target_temperature_c: self.config.target_temperature_c,
            elapsed_secs: self.clock.current().as_secs(),
            days_remaining: self.scheduler.days_remaining(),
            cycle_complete: stage.cycle_complete,
            sensor_failures: self.sensor_failures,
        }
    }

    pub fn stage_state(&self) -> StageState {
        self.scheduler.state()
    }

    pub fn heater_on(&self) -> bool {
        self.heater.is_active()
    }

    pub fn humidifier_on(&self) -> bool {
        self.humidifier.is_active()
    }

    pub fn sensor_failures(&self) -> u32 {
        self.sensor_failures
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &IncubatorConfig {
        &self.config
    }
}
