//! Peripheral lifecycle controller: the hexagonal core.
//!
//! [`PeripheralController`] owns the LED pin and the button driver and
//! maps the host lifecycle onto them:
//!
//! ```text
//!  create ─▶ open LED (out, low) + construct button
//!  start  ─▶ register button
//!  key    ─▶ configured code down: flip LED · up: log only
//!  stop   ─▶ unregister button
//!  destroy─▶ close LED + close button
//! ```
//!
//! Every peripheral failure is caught where it happens, reported through
//! the [`EventSink`], and never returned to the caller.  A handle whose
//! acquisition failed stays `None` for the rest of the session and every
//! use of it is presence-checked.

use embedded_hal::digital::{OutputPin, PinState, StatefulOutputPin};
use log::{info, warn};

use crate::config::ControllerConfig;
use crate::error::PeripheralError;

use super::commands::LifecycleCommand;
use super::events::AppEvent;
use super::keys::{KeyEvent, KeyPhase};
use super::lifecycle::{LifecycleState, Step, Transition};
use super::ports::{ButtonInput, EventSink, LedPin, PeripheralManager};

// ───────────────────────────────────────────────────────────────
// PeripheralController
// ───────────────────────────────────────────────────────────────

pub struct PeripheralController<P: PeripheralManager> {
    config: ControllerConfig,
    state: LifecycleState,
    led: Option<P::Led>,
    button: Option<P::Button>,
    /// Set only after a successful `register`; cleared by stop/destroy.
    registered: bool,
}

impl<P: PeripheralManager> PeripheralController<P> {
    // ── Lifecycle ─────────────────────────────────────────────

    /// Open both peripherals and enter [`LifecycleState::Created`].
    ///
    /// Never fails: a peripheral that cannot be acquired is reported and
    /// left absent.
    pub fn create(
        config: ControllerConfig,
        peripherals: &mut P,
        sink: &mut impl EventSink,
    ) -> Self {
        let led = match Self::open_led(peripherals, &config, sink) {
            Ok(led) => Some(led),
            Err(e) => {
                sink.emit(&AppEvent::LedConfigFailed(e));
                None
            }
        };

        let button = match peripherals.open_button(
            &config.input_pin_name,
            config.button_logic,
            config.active_key_code,
        ) {
            Ok(button) => Some(button),
            Err(e) => {
                sink.emit(&AppEvent::ButtonConfigFailed(e));
                None
            }
        };

        info!(
            "Controller created (led={}, button={})",
            if led.is_some() { "ok" } else { "absent" },
            if button.is_some() { "ok" } else { "absent" },
        );
        sink.emit(&AppEvent::StateChanged {
            from: None,
            to: LifecycleState::Created,
        });

        Self {
            config,
            state: LifecycleState::Created,
            led,
            button,
            registered: false,
        }
    }

    /// Register the button so it starts delivering key events.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        if !self.advance(Transition::Start, sink) {
            return;
        }

        let Some(button) = self.button.as_mut() else {
            sink.emit(&AppEvent::ButtonUnavailable);
            return;
        };
        match button.register() {
            Ok(()) => self.registered = true,
            Err(e) => sink.emit(&AppEvent::ButtonRegistrationFailed(e)),
        }
    }

    /// Unregister the button.  Safe when registration never succeeded.
    pub fn stop(&mut self, sink: &mut impl EventSink) {
        if self.advance(Transition::Stop, sink) {
            self.release_registration(sink);
        }
    }

    /// Close every peripheral still held.  Idempotent.
    pub fn destroy(&mut self, sink: &mut impl EventSink) {
        if !self.advance(Transition::Destroy, sink) {
            return;
        }

        // Destroy straight from Started skips stop; undo the registration here.
        self.release_registration(sink);

        if let Some(led) = self.led.take() {
            if let Err(e) = led.close() {
                sink.emit(&AppEvent::LedCloseFailed(e));
            }
        }
        if let Some(button) = self.button.take() {
            if let Err(e) = button.close() {
                sink.emit(&AppEvent::ButtonCloseFailed(e));
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────

    /// React to one key event.
    ///
    /// Returns `true` when the event carried the configured key code
    /// (consumed), `false` to let the host fall back to default handling.
    pub fn on_key_event(&mut self, event: KeyEvent, sink: &mut impl EventSink) -> bool {
        if event.code != self.config.active_key_code {
            return false;
        }

        match event.phase {
            KeyPhase::Down => {
                sink.emit(&AppEvent::KeyDown(event.code));
                if self.state.is_live() {
                    self.toggle_led(sink);
                }
            }
            KeyPhase::Up => sink.emit(&AppEvent::KeyUp(event.code)),
        }
        true
    }

    /// Drain every pending button event into [`on_key_event`](Self::on_key_event).
    /// Returns how many were consumed.
    pub fn pump_input(&mut self, sink: &mut impl EventSink) -> usize {
        let mut consumed = 0;
        while let Some(event) = self.button.as_mut().and_then(|b| b.poll_event()) {
            if self.on_key_event(event, sink) {
                consumed += 1;
            }
        }
        consumed
    }

    /// Dispatch a [`LifecycleCommand`].
    ///
    /// Returns the consumed flag for [`LifecycleCommand::Key`]; lifecycle
    /// commands always return `true`.
    pub fn handle_command(&mut self, cmd: LifecycleCommand, sink: &mut impl EventSink) -> bool {
        match cmd {
            LifecycleCommand::Start => self.start(sink),
            LifecycleCommand::Stop => self.stop(sink),
            LifecycleCommand::Key(event) => return self.on_key_event(event, sink),
            LifecycleCommand::Destroy => self.destroy(sink),
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn has_led(&self) -> bool {
        self.led.is_some()
    }

    pub fn has_button(&self) -> bool {
        self.button.is_some()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Current LED level read from hardware; `None` when the LED is
    /// absent or the read fails.
    pub fn led_level(&mut self) -> Option<bool> {
        self.led.as_mut().and_then(|led| led.is_set_high().ok())
    }

    // ── Internal ──────────────────────────────────────────────

    fn open_led(
        peripherals: &mut P,
        config: &ControllerConfig,
        sink: &mut impl EventSink,
    ) -> Result<P::Led, PeripheralError> {
        let mut led = peripherals.open_output_pin(&config.output_pin_name)?;
        if let Err(e) = led.set_direction_out_initially_low() {
            // Never keep a line we could not configure.
            if let Err(close_err) = led.close() {
                sink.emit(&AppEvent::LedCloseFailed(close_err));
            }
            return Err(e);
        }
        Ok(led)
    }

    /// Apply `transition`.  Returns `true` when its side effects should run.
    fn advance(&mut self, transition: Transition, sink: &mut impl EventSink) -> bool {
        match self.state.step(transition) {
            Step::Enter(next) => {
                info!("Controller {:?} -> {:?}", self.state, next);
                sink.emit(&AppEvent::StateChanged {
                    from: Some(self.state),
                    to: next,
                });
                self.state = next;
                true
            }
            Step::Stay => false,
            Step::Refuse => {
                warn!("Ignoring {:?} while {:?}", transition, self.state);
                sink.emit(&AppEvent::IllegalTransition {
                    state: self.state,
                    transition,
                });
                false
            }
        }
    }

    fn release_registration(&mut self, sink: &mut impl EventSink) {
        if !self.registered {
            return;
        }
        self.registered = false;
        if let Some(button) = self.button.as_mut() {
            if let Err(e) = button.unregister() {
                sink.emit(&AppEvent::ButtonRegistrationFailed(e));
            }
        }
    }

    fn toggle_led(&mut self, sink: &mut impl EventSink) {
        let Some(led) = self.led.as_mut() else {
            return;
        };
        match flip(led) {
            Ok(on) => sink.emit(&AppEvent::LedToggled { on }),
            Err(e) => sink.emit(&AppEvent::LedToggleFailed(e)),
        }
    }
}

/// Read the level back from the pin and drive its negation.
fn flip(led: &mut impl LedPin) -> Result<bool, PeripheralError> {
    let on = !led.is_set_high()?;
    led.set_state(PinState::from(on))?;
    Ok(on)
}
