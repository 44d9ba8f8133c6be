//! Incubator Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink   JsonTelemetrySink           │
//! │  (Sensor+Actuator)  (EventSink)    (EventSink)                 │
//! │  MonotonicClock     BOOT button, console → request_reset()     │
//! │  (TimePort)                                                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           IncubationService (pure logic)               │    │
//! │  │  StageScheduler · Heater · Humidifier hysteresis       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  LoopTimers (control 2 s · telemetry 5 s)                      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;

use anyhow::Result;
use esp_idf_svc::hal::delay::{Delay, FreeRtos};
use esp_idf_svc::hal::gpio::{PinDriver, Pull};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use log::{info, warn};

use incubator::adapters::hardware::HardwareAdapter;
use incubator::adapters::log_sink::LogEventSink;
use incubator::adapters::telemetry::{JsonTelemetrySink, OUTBOX_DEPTH};
use incubator::adapters::time::MonotonicClock;
use incubator::app::commands::AppCommand;
use incubator::app::ports::TimePort;
use incubator::app::service::IncubationService;
use incubator::config::IncubatorConfig;
use incubator::drivers::relay::{Polarity, Relay};
use incubator::error::Error;
use incubator::remote::{ResetSource, request_reset, take_reset_request};
use incubator::sensors::sht3x::{DEFAULT_ADDRESS, Sht3x};
use incubator::timers::LoopTimers;

/// Loop granularity.  Both timers are multiples of this.
const LOOP_SLEEP_MS: u32 = 50;

/// Build-time JSON override for the defaults, e.g. a short
/// `day_duration_secs` for bench runs.
const CONFIG_OVERRIDE: Option<&str> = option_env!("INCUBATOR_CONFIG_JSON");

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Incubator v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match CONFIG_OVERRIDE {
        Some(json) => IncubatorConfig::from_json(json)
            .map_err(|e| anyhow::anyhow!("override rejected, {}", Error::from(e)))?,
        None => IncubatorConfig::default(),
    };
    info!(
        "Config: {:.1}°C ±{:.1}, RH {} then {} ±{:.1}, lockdown after day {} of {}",
        config.target_temperature_c,
        config.temperature_tolerance_c,
        config.incubation_band,
        config.lockdown_band,
        config.humidity_tolerance_pct,
        config.incubation_days,
        config.total_days,
    );

    // ── 3. Peripherals ────────────────────────────────────────
    //   GPIO21/22  SHT3x SDA/SCL (I2C0, 100 kHz)
    //   GPIO26     heater relay      (active-low module)
    //   GPIO27     humidifier relay  (active-low module)
    //   GPIO0      BOOT button → restart cycle
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio21,
        pins.gpio22,
        &I2cConfig::new().baudrate(100.kHz().into()),
    )?;
    let mut sensor = Sht3x::with_address(i2c, Delay::new_default(), DEFAULT_ADDRESS);
    if let Err(e) = sensor.reset() {
        warn!("SHT3x soft reset failed ({}), continuing", e);
    }

    let heater = Relay::new(PinDriver::output(pins.gpio26)?, Polarity::ActiveLow, "heater");
    let humidifier = Relay::new(
        PinDriver::output(pins.gpio27)?,
        Polarity::ActiveLow,
        "humidifier",
    );
    let mut hw = HardwareAdapter::new(sensor, heater, humidifier);

    let mut button = PinDriver::input(pins.gpio0)?;
    button.set_pull(Pull::Up)?;
    let mut button_was_down = false;

    // ── 4. Console: "reset" restarts the cycle ────────────────
    std::thread::Builder::new()
        .name("console".into())
        .stack_size(4096)
        .spawn(|| {
            for line in std::io::stdin().lock().lines().map_while(std::io::Result::ok) {
                match line.trim() {
                    "reset" => request_reset(ResetSource::Console),
                    "" => {}
                    other => warn!("Console: unknown command '{}'", other),
                }
            }
        })?;

    // ── 5. Application service ────────────────────────────────
    let clock = MonotonicClock::new();
    let mut sink = (LogEventSink::new(), JsonTelemetrySink::<OUTBOX_DEPTH>::new());
    let mut timers = LoopTimers::new(&config, clock.now_ms());
    let mut app =
        IncubationService::new(config).map_err(|e| anyhow::anyhow!("{}", Error::from(e)))?;
    app.start(clock.uptime(), &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();
        let now = core::time::Duration::from_millis(now_ms);

        let button_down = button.is_low();
        if button_down && !button_was_down {
            info!("Button: restart cycle");
            request_reset(ResetSource::Button);
        }
        button_was_down = button_down;

        // Between ticks only, so a restart never lands mid-cycle.
        if let Some(source) = take_reset_request() {
            app.handle_command(AppCommand::RestartCycle(source), now, &mut sink);
        }

        let due = timers.poll(now_ms);
        if due.control {
            app.tick(now, &mut hw, &mut sink);
        }
        if due.telemetry {
            app.emit_status(&mut sink);
        }

        // Serial JSON bridge for the dashboard.
        sink.1.drain(|line| println!("{line}"));

        FreeRtos::delay_ms(LOOP_SLEEP_MS);
    }
}
