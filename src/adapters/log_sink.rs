//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the `log`
//! facade (ESP-IDF logger → UART / USB-CDC in production).  Every line
//! goes out under the fixed [`TAG`] target so the controller's output can
//! be filtered from the rest of the firmware.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Log target for every controller line.
pub const TAG: &str = "ButtonActivity";

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::StateChanged { from: None, to } => {
                info!(target: TAG, "STATE | -> {:?}", to);
            }
            AppEvent::StateChanged { from: Some(from), to } => {
                info!(target: TAG, "STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::IllegalTransition { state, transition } => {
                warn!(target: TAG, "STATE | {:?} ignored while {:?}", transition, state);
            }
            AppEvent::LedConfigFailed(e) => {
                error!(target: TAG, "Error LED GPIO configuration: {}", e);
            }
            AppEvent::ButtonConfigFailed(e) => {
                error!(target: TAG, "Error configuring button GPIO: {}", e);
            }
            AppEvent::ButtonRegistrationFailed(e) => {
                error!(target: TAG, "Error on button registration: {}", e);
            }
            AppEvent::ButtonUnavailable => {
                warn!(target: TAG, "Button driver absent, not registering");
            }
            AppEvent::KeyDown(code) => {
                info!(target: TAG, "Button KeyDown (code={})", code.0);
            }
            AppEvent::KeyUp(code) => {
                info!(target: TAG, "Button KeyUp (code={})", code.0);
            }
            AppEvent::LedToggled { on } => {
                info!(target: TAG, "LED {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::LedToggleFailed(e) => {
                error!(target: TAG, "Error on LED GPIO SetValue: {}", e);
            }
            AppEvent::LedCloseFailed(e) => {
                error!(target: TAG, "Error closing GPIO driver: {}", e);
            }
            AppEvent::ButtonCloseFailed(e) => {
                error!(target: TAG, "Error closing Button driver: {}", e);
            }
        }
    }
}
