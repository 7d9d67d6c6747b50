//! Integration tests for the lifecycle → peripheral call pipeline.
//!
//! These run on the host and drive a [`PeripheralController`] through
//! create/start/key/stop/destroy against the recording mock bench.

use crate::mock_hw::{Bench, Faults, HwCall, RecordingSink};

use ledtoggle::app::commands::LifecycleCommand;
use ledtoggle::app::events::AppEvent;
use ledtoggle::app::keys::{KeyCode, KeyEvent, LogicState};
use ledtoggle::app::lifecycle::{LifecycleState, Transition};
use ledtoggle::app::service::PeripheralController;
use ledtoggle::config::ControllerConfig;

fn make_controller(bench: &Bench) -> (PeripheralController<Bench>, RecordingSink) {
    let mut sink = RecordingSink::new();
    let mut peripherals = bench.clone();
    let ctl = PeripheralController::create(ControllerConfig::default(), &mut peripherals, &mut sink);
    (ctl, sink)
}

fn started(bench: &Bench) -> (PeripheralController<Bench>, RecordingSink) {
    let (mut ctl, mut sink) = make_controller(bench);
    ctl.start(&mut sink);
    (ctl, sink)
}

// ── create ────────────────────────────────────────────────────

#[test]
fn create_opens_led_low_then_builds_active_low_button() {
    let bench = Bench::new();
    let (mut ctl, sink) = make_controller(&bench);

    assert_eq!(ctl.state(), LifecycleState::Created);
    assert_eq!(
        bench.calls(),
        vec![
            HwCall::OpenOutput("BCM6".into()),
            HwCall::SetDirection,
            HwCall::OpenButton {
                name: "BCM21".into(),
                logic: LogicState::PressedWhenLow,
                key_code: KeyCode::SPACE,
            },
        ]
    );
    assert_eq!(ctl.led_level(), Some(false));
    assert!(ctl.has_button());
    assert!(!ctl.is_registered());
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::StateChanged { from: None, to: LifecycleState::Created })
    );
}

#[test]
fn led_open_failure_leaves_led_absent_and_key_down_is_noop() {
    let bench = Bench::with_faults(Faults { open_led: true, ..Faults::default() });
    let (mut ctl, mut sink) = started(&bench);

    assert!(!ctl.has_led());
    assert!(ctl.has_button(), "button construction still attempted");
    assert!(sink.has(|e| matches!(e, AppEvent::LedConfigFailed(_))));

    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));
    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));
    assert_eq!(bench.count(&HwCall::ReadLed), 0);
    assert_eq!(sink.toggles(), 0);
    assert!(!sink.has(|e| matches!(e, AppEvent::LedToggleFailed(_))));
}

#[test]
fn failed_direction_releases_the_line() {
    let bench = Bench::with_faults(Faults { set_direction: true, ..Faults::default() });
    let (ctl, sink) = make_controller(&bench);

    assert!(!ctl.has_led());
    assert!(!bench.led_open());
    assert_eq!(bench.count(&HwCall::CloseLed), 1);
    assert!(sink.has(|e| matches!(e, AppEvent::LedConfigFailed(_))));
}

#[test]
fn failed_release_after_bad_direction_is_reported() {
    let bench = Bench::with_faults(Faults {
        set_direction: true,
        close_led: true,
        ..Faults::default()
    });
    let (ctl, sink) = make_controller(&bench);

    assert!(!ctl.has_led());
    assert_eq!(bench.count(&HwCall::CloseLed), 1);
    assert!(sink.has(|e| matches!(e, AppEvent::LedCloseFailed(_))));
    assert!(sink.has(|e| matches!(e, AppEvent::LedConfigFailed(_))));
}

#[test]
fn button_failure_makes_start_and_stop_guarded() {
    let bench = Bench::with_faults(Faults { open_button: true, ..Faults::default() });
    let (mut ctl, mut sink) = started(&bench);

    assert!(sink.has(|e| matches!(e, AppEvent::ButtonConfigFailed(_))));
    assert!(sink.has(|e| *e == AppEvent::ButtonUnavailable));
    assert_eq!(ctl.state(), LifecycleState::Started);

    ctl.stop(&mut sink);
    assert_eq!(ctl.state(), LifecycleState::Stopped);
    assert_eq!(bench.count(&HwCall::Register), 0);
    assert_eq!(bench.count(&HwCall::Unregister), 0);

    // The LED still works for events injected directly.
    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));
    assert_eq!(ctl.led_level(), Some(true));
}

// ── start / stop ──────────────────────────────────────────────

#[test]
fn start_registers_and_stop_unregisters() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    assert!(ctl.is_registered());
    assert_eq!(bench.count(&HwCall::Register), 1);

    ctl.stop(&mut sink);
    assert!(!ctl.is_registered());
    assert_eq!(bench.count(&HwCall::Unregister), 1);

    // Re-entering the foreground registers again.
    ctl.start(&mut sink);
    ctl.stop(&mut sink);
    assert_eq!(bench.count(&HwCall::Register), 2);
    assert_eq!(bench.count(&HwCall::Unregister), 2);
}

#[test]
fn failed_registration_is_not_undone_on_stop() {
    let bench = Bench::with_faults(Faults { register: true, ..Faults::default() });
    let (mut ctl, mut sink) = started(&bench);

    assert!(!ctl.is_registered());
    assert!(sink.has(|e| matches!(e, AppEvent::ButtonRegistrationFailed(_))));

    ctl.stop(&mut sink);
    assert_eq!(bench.count(&HwCall::Unregister), 0);
    assert_eq!(ctl.state(), LifecycleState::Stopped);
}

#[test]
fn double_start_is_refused() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    ctl.start(&mut sink);

    assert_eq!(bench.count(&HwCall::Register), 1);
    assert!(sink.has(|e| *e
        == AppEvent::IllegalTransition {
            state: LifecycleState::Started,
            transition: Transition::Start,
        }));
}

// ── key events ────────────────────────────────────────────────

#[test]
fn key_down_toggles_and_key_up_only_logs() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);

    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));
    assert!(bench.led_level());
    assert!(ctl.on_key_event(KeyEvent::up(KeyCode::SPACE), &mut sink));
    assert!(ctl.on_key_event(KeyEvent::up(KeyCode::SPACE), &mut sink));
    assert!(bench.led_level(), "key-up must not toggle");

    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));
    assert!(!bench.led_level());

    assert_eq!(sink.toggles(), 2);
    assert_eq!(bench.count(&HwCall::WriteLed(true)), 1);
    assert_eq!(bench.count(&HwCall::WriteLed(false)), 1);
    assert!(sink.has(|e| *e == AppEvent::KeyUp(KeyCode::SPACE)));
}

#[test]
fn toggle_reads_hardware_before_writing() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    let before = bench.calls().len();

    ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink);
    assert_eq!(&bench.calls()[before..], &[HwCall::ReadLed, HwCall::WriteLed(true)]);
}

#[test]
fn foreign_key_is_not_consumed() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    let before = sink.events.len();

    assert!(!ctl.on_key_event(KeyEvent::down(KeyCode::ENTER), &mut sink));
    assert!(!ctl.on_key_event(KeyEvent::up(KeyCode::ENTER), &mut sink));

    assert_eq!(sink.events.len(), before);
    assert!(!bench.led_level());
    assert_eq!(bench.count(&HwCall::ReadLed), 0);
}

#[test]
fn write_failure_is_reported_and_level_kept() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    bench.set_faults(Faults { write_led: true, ..Faults::default() });

    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));
    assert!(!bench.led_level());
    assert!(sink.has(|e| matches!(e, AppEvent::LedToggleFailed(_))));
    assert_eq!(sink.toggles(), 0);
}

#[test]
fn read_failure_skips_the_write() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    bench.set_faults(Faults { read_led: true, ..Faults::default() });

    ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink);
    assert_eq!(bench.count(&HwCall::WriteLed(true)), 0);
    assert!(sink.has(|e| matches!(e, AppEvent::LedToggleFailed(_))));
}

#[test]
fn button_presses_flow_through_driver() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = make_controller(&bench);

    // Not registered yet: press is swallowed.
    bench.press();
    bench.release();
    assert_eq!(ctl.pump_input(&mut sink), 0);
    assert!(!bench.led_level());

    ctl.start(&mut sink);
    bench.press();
    bench.release();
    assert_eq!(ctl.pump_input(&mut sink), 2);
    assert!(bench.led_level());
    assert!(sink.has(|e| *e == AppEvent::KeyDown(KeyCode::SPACE)));
    assert!(sink.has(|e| *e == AppEvent::KeyUp(KeyCode::SPACE)));

    ctl.stop(&mut sink);
    bench.press();
    assert_eq!(ctl.pump_input(&mut sink), 0);
    assert!(bench.led_level());
}

// ── destroy ───────────────────────────────────────────────────

#[test]
fn destroy_closes_both_and_is_idempotent() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    ctl.stop(&mut sink);
    ctl.destroy(&mut sink);

    assert_eq!(ctl.state(), LifecycleState::Destroyed);
    assert!(!ctl.has_led() && !ctl.has_button());
    assert!(!bench.led_open() && !bench.button_open());

    let calls = bench.calls().len();
    ctl.destroy(&mut sink);
    assert_eq!(bench.calls().len(), calls, "second destroy touches nothing");
    assert_eq!(bench.count(&HwCall::CloseLed), 1);
    assert_eq!(bench.count(&HwCall::CloseButton), 1);
}

#[test]
fn close_failures_are_logged_not_propagated() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    bench.set_faults(Faults {
        close_led: true,
        close_button: true,
        ..Faults::default()
    });
    ctl.stop(&mut sink);
    ctl.destroy(&mut sink);

    assert!(sink.has(|e| matches!(e, AppEvent::LedCloseFailed(_))));
    assert!(sink.has(|e| matches!(e, AppEvent::ButtonCloseFailed(_))));
    assert!(!ctl.has_led() && !ctl.has_button());
}

#[test]
fn destroy_from_started_unregisters_first() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    ctl.destroy(&mut sink);

    let calls = bench.calls();
    let unreg = calls.iter().position(|c| *c == HwCall::Unregister);
    let close = calls.iter().position(|c| *c == HwCall::CloseButton);
    assert!(unreg.is_some() && unreg < close);
}

#[test]
fn destroy_with_nothing_opened_is_clean() {
    let bench = Bench::with_faults(Faults {
        open_led: true,
        open_button: true,
        ..Faults::default()
    });
    let (mut ctl, mut sink) = make_controller(&bench);
    ctl.destroy(&mut sink);
    ctl.destroy(&mut sink);

    assert_eq!(bench.count(&HwCall::CloseLed), 0);
    assert_eq!(bench.count(&HwCall::CloseButton), 0);
    assert_eq!(ctl.state(), LifecycleState::Destroyed);
}

#[test]
fn calls_after_destroy_are_refused_without_touching_hardware() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = started(&bench);
    ctl.stop(&mut sink);
    ctl.destroy(&mut sink);
    let calls = bench.calls().len();

    ctl.start(&mut sink);
    ctl.stop(&mut sink);
    let toggles = sink.toggles();
    assert!(ctl.on_key_event(KeyEvent::down(KeyCode::SPACE), &mut sink));

    assert_eq!(bench.calls().len(), calls);
    assert_eq!(sink.toggles(), toggles);
    assert_eq!(ctl.state(), LifecycleState::Destroyed);
    assert!(sink.has(|e| matches!(e, AppEvent::IllegalTransition { transition: Transition::Start, .. })));
}

// ── command replay ────────────────────────────────────────────

#[test]
fn replaying_a_full_script() {
    let bench = Bench::new();
    let (mut ctl, mut sink) = make_controller(&bench);
    let space = KeyCode::SPACE;

    let script = [
        LifecycleCommand::Start,
        LifecycleCommand::Key(KeyEvent::down(space)),
        LifecycleCommand::Key(KeyEvent::up(space)),
        LifecycleCommand::Stop,
        LifecycleCommand::Start,
        LifecycleCommand::Key(KeyEvent::down(space)),
        LifecycleCommand::Key(KeyEvent::down(space)),
        LifecycleCommand::Stop,
        LifecycleCommand::Destroy,
    ];
    for cmd in script {
        assert!(ctl.handle_command(cmd, &mut sink));
    }

    assert_eq!(sink.toggles(), 3);
    assert!(bench.led_level());
    assert_eq!(ctl.state(), LifecycleState::Destroyed);
    assert!(!ctl.handle_command(LifecycleCommand::Key(KeyEvent::down(KeyCode::ENTER)), &mut sink));
}
