//! Outbound application events.
//!
//! The [`PeripheralController`](super::service::PeripheralController) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them; the firmware logs them
//! to the serial console, tests record them.

use crate::error::PeripheralError;

use super::keys::KeyCode;
use super::lifecycle::{LifecycleState, Transition};

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller moved between lifecycle states.
    StateChanged {
        from: Option<LifecycleState>,
        to: LifecycleState,
    },

    /// A lifecycle call arrived in a state that does not accept it.
    IllegalTransition {
        state: LifecycleState,
        transition: Transition,
    },

    /// The LED GPIO could not be opened or configured.
    LedConfigFailed(PeripheralError),

    /// The button driver could not be constructed.
    ButtonConfigFailed(PeripheralError),

    /// The button could not be registered or unregistered.
    ButtonRegistrationFailed(PeripheralError),

    /// `start` was called but there is no button to register.
    ButtonUnavailable,

    /// The configured key went down.
    KeyDown(KeyCode),

    /// The configured key came back up.
    KeyUp(KeyCode),

    /// The LED was flipped; carries the new level.
    LedToggled { on: bool },

    /// Reading or writing the LED level failed.
    LedToggleFailed(PeripheralError),

    /// Closing the LED GPIO failed.
    LedCloseFailed(PeripheralError),

    /// Closing the button driver failed.
    ButtonCloseFailed(PeripheralError),
}
