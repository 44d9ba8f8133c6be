//! Integration tests for the IncubationService → scheduler → actuators
//! pipeline.
//!
//! Time is injected, so a whole 21-day cycle runs in microseconds.

use core::time::Duration;

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

use incubator::app::commands::AppCommand;
use incubator::app::events::AppEvent;
use incubator::app::service::IncubationService;
use incubator::config::IncubatorConfig;
use incubator::control::Band;
use incubator::remote::{ResetSource, request_reset, take_reset_request};
use incubator::scheduler::{Stage, StageEvent};

const DAY_SECS: u64 = 86_400;

fn days(n: u64) -> Duration {
    Duration::from_secs(n * DAY_SECS)
}

fn band(min: f32, max: f32) -> Band {
    Band::new(min, max).unwrap()
}

fn make_app_with(config: IncubatorConfig) -> (IncubationService, RecordingSink) {
    let mut app = IncubationService::new(config).unwrap();
    let mut sink = RecordingSink::new();
    app.start(Duration::ZERO, &mut sink);
    sink.take();
    (app, sink)
}

fn make_app() -> (IncubationService, RecordingSink) {
    make_app_with(IncubatorConfig::default())
}

fn stage_events(events: &[AppEvent]) -> Vec<StageEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Stage(s) => Some(*s),
            _ => None,
        })
        .collect()
}

// ── Heater hysteresis ─────────────────────────────────────────

#[test]
fn heater_switches_once_and_holds_in_dead_zone() {
    let (mut app, mut sink) = make_app_with(IncubatorConfig {
        target_temperature_c: 37.0,
        ..IncubatorConfig::default()
    });
    let mut hw = MockHardware::new(36.2, 52.0);

    app.tick(Duration::from_secs(2), &mut hw, &mut sink);
    assert_eq!(hw.calls, vec![ActuatorCall::Heater(true)]);
    assert_eq!(sink.take(), vec![AppEvent::HeaterChanged { on: true }]);

    // 36.6 sits between 36.5 and 37.5: no new command.
    hw.set_climate(36.6, 52.0);
    app.tick(Duration::from_secs(4), &mut hw, &mut sink);
    assert_eq!(hw.calls.len(), 1);
    assert!(sink.events.is_empty());
    assert!(app.heater_on());

    hw.set_climate(37.6, 52.0);
    app.tick(Duration::from_secs(6), &mut hw, &mut sink);
    assert_eq!(hw.heater_calls(), vec![true, false]);
    assert_eq!(sink.take(), vec![AppEvent::HeaterChanged { on: false }]);
}

#[test]
fn steady_cold_reading_commands_heater_once() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(35.0, 52.0);

    for i in 1..=10 {
        app.tick(Duration::from_secs(2 * i), &mut hw, &mut sink);
    }
    assert_eq!(hw.heater_calls(), vec![true]);
    assert_eq!(app.tick_count(), 10);
}

// ── Sensor failure ────────────────────────────────────────────

#[test]
fn sensor_failure_reports_and_touches_nothing() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(0.0, 0.0);
    hw.fail_reads();

    app.tick(Duration::from_secs(2), &mut hw, &mut sink);

    assert_eq!(sink.take(), vec![AppEvent::SensorError { consecutive: 1 }]);
    assert!(hw.calls.is_empty(), "no actuator call on a failed read");
    assert_eq!(hw.reads, 1);
}

#[test]
fn sensor_failure_does_not_advance_stage() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(0.0, 0.0);
    hw.fail_reads();

    app.tick(days(18), &mut hw, &mut sink);
    app.tick(days(18) + Duration::from_secs(2), &mut hw, &mut sink);
    assert_eq!(
        sink.take(),
        vec![
            AppEvent::SensorError { consecutive: 1 },
            AppEvent::SensorError { consecutive: 2 },
        ]
    );
    assert_eq!(app.stage_state().day, 1);
    assert_eq!(app.sensor_failures(), 2);

    // First good read catches up on the missed days in one step.
    hw.set_climate(37.5, 70.0);
    app.tick(days(18) + Duration::from_secs(4), &mut hw, &mut sink);
    assert_eq!(app.sensor_failures(), 0);
    assert_eq!(
        stage_events(&sink.take()),
        vec![StageEvent::LockdownStarted {
            day: 19,
            band: band(65.0, 75.0),
        }]
    );
}

// ── Stage progression ─────────────────────────────────────────

#[test]
fn first_tick_is_day_one_incubation() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 52.0);

    app.tick(Duration::ZERO, &mut hw, &mut sink);

    let state = app.stage_state();
    assert_eq!(state.day, 1);
    assert_eq!(state.stage, Stage::Incubation);
    assert_eq!(state.target_band, band(50.0, 55.0));
    assert!(stage_events(&sink.events).is_empty());
}

#[test]
fn lockdown_starts_once_and_raises_humidity() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 52.0);

    app.tick(Duration::ZERO, &mut hw, &mut sink);
    assert!(hw.humidifier_calls().is_empty());

    app.tick(days(18), &mut hw, &mut sink);
    let events = sink.take();
    assert_eq!(
        stage_events(&events),
        vec![StageEvent::LockdownStarted {
            day: 19,
            band: band(65.0, 75.0),
        }]
    );
    // 52 %RH is now far below 65 − 2.
    assert!(events.contains(&AppEvent::HumidifierChanged { on: true }));
    assert_eq!(hw.humidifier_calls(), vec![true]);

    app.tick(days(18) + Duration::from_secs(2), &mut hw, &mut sink);
    assert!(stage_events(&sink.take()).is_empty());
    assert_eq!(app.stage_state().stage, Stage::Lockdown);
}

#[test]
fn every_day_is_reported_in_a_continuous_run() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 52.0);

    for d in 0..=21 {
        app.tick(days(d), &mut hw, &mut sink);
    }

    let stages = stage_events(&sink.events);
    assert_eq!(stages.len(), 21, "days 2..=21 plus completion");
    assert!(matches!(
        stages[0],
        StageEvent::DayAdvanced { day: 2, stage: Stage::Incubation, .. }
    ));
    assert_eq!(
        stages.iter().filter(|e| matches!(e, StageEvent::LockdownStarted { .. })).count(),
        1
    );
    assert_eq!(stages.last(), Some(&StageEvent::Completed { day: 22 }));
}

#[test]
fn completed_once_then_silent() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 70.0);

    app.tick(days(21) + Duration::from_secs(1), &mut hw, &mut sink);
    assert_eq!(
        stage_events(&sink.take()),
        vec![StageEvent::Completed { day: 22 }]
    );

    for extra in 1..5 {
        app.tick(days(21 + extra), &mut hw, &mut sink);
    }
    assert!(stage_events(&sink.events).is_empty());

    let state = app.stage_state();
    assert!(state.cycle_complete);
    assert_eq!(state.target_band, band(65.0, 75.0), "lockdown band stays after completion");
    assert_eq!(app.build_status().days_remaining, 0);
}

#[test]
fn control_continues_after_completion() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 70.0);

    app.tick(days(22), &mut hw, &mut sink);
    hw.set_climate(35.0, 70.0);
    app.tick(days(22) + Duration::from_secs(2), &mut hw, &mut sink);
    assert_eq!(hw.heater_calls(), vec![true]);
}

// ── Restart ───────────────────────────────────────────────────

#[test]
fn restart_returns_to_day_one_without_actuator_calls() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 60.0);

    app.tick(days(20), &mut hw, &mut sink);
    assert_eq!(app.stage_state().stage, Stage::Lockdown);
    let calls_before = hw.calls.len();
    sink.take();

    app.restart_cycle(days(20), ResetSource::Remote, &mut sink);

    assert_eq!(
        sink.take(),
        vec![AppEvent::TimerReset {
            source: ResetSource::Remote,
        }]
    );
    assert_eq!(hw.calls.len(), calls_before, "restart must not drive outputs");

    let state = app.stage_state();
    assert_eq!(state.day, 1);
    assert_eq!(state.stage, Stage::Incubation);
    assert_eq!(state.target_band, band(50.0, 55.0));
    assert!(!state.cycle_complete);
}

#[test]
fn restart_reanchors_the_clock() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 52.0);

    let restart_at = days(5) + Duration::from_secs(3600);
    app.tick(restart_at, &mut hw, &mut sink);
    app.handle_command(
        AppCommand::RestartCycle(ResetSource::Button),
        restart_at,
        &mut sink,
    );
    sink.take();

    // 17 days after the restart is still incubation day 18.
    app.tick(restart_at + days(17), &mut hw, &mut sink);
    assert_eq!(app.stage_state().day, 18);
    assert_eq!(app.stage_state().stage, Stage::Incubation);
    assert!(matches!(
        stage_events(&sink.take()).as_slice(),
        [StageEvent::DayAdvanced { day: 18, .. }]
    ));

    app.tick(restart_at + days(18), &mut hw, &mut sink);
    assert!(matches!(
        stage_events(&sink.take()).as_slice(),
        [StageEvent::LockdownStarted { day: 19, .. }]
    ));
}

#[test]
fn tick_right_after_restart_stays_on_day_one() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 70.0);

    app.tick(days(19), &mut hw, &mut sink);
    app.restart_cycle(days(19), ResetSource::Button, &mut sink);
    sink.take();

    app.tick(days(19), &mut hw, &mut sink);
    assert!(stage_events(&sink.take()).is_empty());
    assert_eq!(app.stage_state().day, 1);
    assert_eq!(app.stage_state().stage, Stage::Incubation);
}

#[test]
fn restart_twice_equals_restart_once() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 52.0);
    app.tick(days(19), &mut hw, &mut sink);

    app.restart_cycle(days(19), ResetSource::Console, &mut sink);
    let once = app.stage_state();
    app.restart_cycle(days(19), ResetSource::Console, &mut sink);
    assert_eq!(app.stage_state(), once);
}

#[test]
fn remote_signal_reaches_service() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.5, 52.0);
    app.tick(days(10), &mut hw, &mut sink);
    sink.take();

    // Two requests before the loop drains them collapse into one.
    request_reset(ResetSource::Remote);
    request_reset(ResetSource::Remote);

    while let Some(source) = take_reset_request() {
        app.handle_command(AppCommand::RestartCycle(source), days(10), &mut sink);
    }

    assert_eq!(
        sink.take(),
        vec![AppEvent::TimerReset {
            source: ResetSource::Remote,
        }]
    );
    assert_eq!(app.stage_state().day, 1);
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_snapshot_reflects_state() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(36.0, 45.0);

    app.tick(days(3) + Duration::from_secs(10), &mut hw, &mut sink);
    app.handle_command(AppCommand::EmitStatus, days(3), &mut sink);

    let Some(AppEvent::Status(s)) = sink.events.last() else {
        panic!("expected a status event, got {:?}", sink.events.last());
    };
    assert_eq!(s.temperature_c, Some(36.0));
    assert_eq!(s.humidity_pct, Some(45.0));
    assert!(s.heater_on);
    assert!(s.humidifier_on);
    assert_eq!(s.day, 4);
    assert_eq!(s.stage, Stage::Incubation);
    assert_eq!(s.humidity_band, band(50.0, 55.0));
    assert_eq!(s.elapsed_secs, 3 * DAY_SECS + 10);
    assert_eq!(s.days_remaining, 17);
    assert!(!s.cycle_complete);
    assert_eq!(s.sensor_failures, 0);
}

#[test]
fn status_keeps_last_good_reading_through_failures() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(37.4, 53.0);
    app.tick(Duration::from_secs(2), &mut hw, &mut sink);

    hw.fail_reads();
    app.tick(Duration::from_secs(4), &mut hw, &mut sink);

    let s = app.build_status();
    assert_eq!(s.temperature_c, Some(37.4));
    assert_eq!(s.sensor_failures, 1);
}

// ── Shutdown ──────────────────────────────────────────────────

#[test]
fn shutdown_turns_everything_off() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(35.0, 40.0);
    app.tick(Duration::from_secs(2), &mut hw, &mut sink);
    assert!(app.heater_on() && app.humidifier_on());

    app.shutdown(&mut hw);
    assert_eq!(hw.calls.last(), Some(&ActuatorCall::AllOff));
    assert!(!app.heater_on());
    assert!(!app.humidifier_on());

    // Same cold reading turns the heater back on from a clean state.
    app.tick(Duration::from_secs(4), &mut hw, &mut sink);
    assert_eq!(hw.heater_calls(), vec![true, true]);
}
