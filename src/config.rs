//! Controller configuration.
//!
//! Fixed at build time: the defaults come from [`pins`](crate::pins) and
//! the key code the button emits.  There is no runtime override (no
//! NVS, no files), but the struct is serde-capable so it can be logged
//! or dumped for diagnostics.

use serde::{Deserialize, Serialize};

use crate::app::keys::{KeyCode, LogicState};
use crate::error::ConfigError;
use crate::pins;

/// Fixed-capacity pin name ("BCM21", "GPIO6", ...).
pub type PinName = heapless::String<16>;

/// Startup configuration for the [`PeripheralController`](crate::app::service::PeripheralController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// GPIO driving the LED.
    pub output_pin_name: PinName,
    /// GPIO wired to the button.
    pub input_pin_name: PinName,
    /// Key code the button emits and the controller reacts to.
    pub active_key_code: KeyCode,
    /// Button polarity.
    pub button_logic: LogicState,
}

impl ControllerConfig {
    /// Build a config from plain strings.  Names longer than
    /// [`PinName`]'s capacity come back empty and fail [`validate`](Self::validate).
    pub fn new(output_pin_name: &str, input_pin_name: &str, active_key_code: KeyCode) -> Self {
        Self {
            output_pin_name: PinName::try_from(output_pin_name).unwrap_or_default(),
            input_pin_name: PinName::try_from(input_pin_name).unwrap_or_default(),
            active_key_code,
            button_logic: LogicState::PressedWhenLow,
        }
    }

    /// Reject configurations that could never open both peripherals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_pin_name.is_empty() {
            return Err(ConfigError::EmptyPinName("output_pin_name"));
        }
        if self.input_pin_name.is_empty() {
            return Err(ConfigError::EmptyPinName("input_pin_name"));
        }
        let out = pins::gpio_number(&self.output_pin_name)
            .ok_or(ConfigError::UnknownPin("output_pin_name"))?;
        let inp = pins::gpio_number(&self.input_pin_name)
            .ok_or(ConfigError::UnknownPin("input_pin_name"))?;
        if out == inp {
            return Err(ConfigError::PinConflict);
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(pins::LED_PIN_NAME, pins::BUTTON_PIN_NAME, KeyCode::SPACE)
    }
}
