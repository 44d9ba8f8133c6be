//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing human-readable lines to the logger
//! (UART / USB-CDC in production).  This is where structured events are
//! finally formatted for display.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::scheduler::StageEvent;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                let temp = s
                    .temperature_c
                    .map_or_else(|| "--".into(), |t| format!("{t:.1}"));
                let hum = s
                    .humidity_pct
                    .map_or_else(|| "--".into(), |h| format!("{h:.1}"));
                info!(
                    "STATUS | day {} ({}){} | T={}\u{00b0}C (set {:.1}) | RH={}% band {} | \
                     heater={} humidifier={} | sensor_failures={}",
                    s.day,
                    s.stage,
                    if s.cycle_complete { " COMPLETE" } else { "" },
                    temp,
                    s.target_temperature_c,
                    hum,
                    s.humidity_band,
                    on_off(s.heater_on),
                    on_off(s.humidifier_on),
                    s.sensor_failures,
                );
            }
            AppEvent::Started { day, stage, band } => {
                info!("START | day {} ({}), RH band {}", day, stage, band);
            }
            AppEvent::SensorError { consecutive } => {
                warn!("SENSOR | read failed ({} consecutive)", consecutive);
            }
            AppEvent::Stage(StageEvent::DayAdvanced { day, stage, band }) => {
                info!("STAGE | day {} ({}), RH band {}", day, stage, band);
            }
            AppEvent::Stage(StageEvent::LockdownStarted { day, band }) => {
                info!("STAGE | day {}: LOCKDOWN, keep the lid closed, RH band {}", day, band);
            }
            AppEvent::Stage(StageEvent::Completed { day }) => {
                info!("STAGE | cycle complete (day {})", day);
            }
            AppEvent::HeaterChanged { on } => {
                info!("HEATER | {}", on_off(*on));
            }
            AppEvent::HumidifierChanged { on } => {
                info!("HUMIDIFIER | {}", on_off(*on));
            }
            AppEvent::TimerReset { source } => {
                info!("RESET | incubation timer restarted ({:?})", source);
            }
        }
    }
}
