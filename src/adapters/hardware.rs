//! Hardware adapter: bridges GPIO pads to the domain port traits.
//!
//! [`HardwarePeripherals`] resolves pin names through [`pins`], claims
//! each line exclusively, and hands out [`GpioLed`] / [`GpioButton`]
//! handles.  This is the only module that touches actual hardware; on
//! non-espidf targets [`hw_init`] swaps in its host pad model.

use core::sync::atomic::{AtomicU64, Ordering};

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::app::keys::{KeyCode, KeyEvent, LogicState};
use crate::app::ports::{ButtonInput, LedPin, PeripheralManager};
use crate::drivers::button::{self, ButtonInputDriver};
use crate::drivers::hw_init;
use crate::error::{PeripheralError, PeripheralOp, Result};
use crate::pins;

/// `esp_err_t` values reused for failures detected on this side.
const ERR_INVALID_STATE: i32 = 0x103;
const ERR_NOT_FOUND: i32 = 0x105;

/// One bit per GPIO currently held by a handle.
static CLAIMED: AtomicU64 = AtomicU64::new(0);

fn claim(gpio: i32) -> Result<()> {
    let bit = 1u64 << gpio;
    if CLAIMED.fetch_or(bit, Ordering::AcqRel) & bit != 0 {
        return Err(PeripheralError::new(PeripheralOp::Open, ERR_INVALID_STATE));
    }
    Ok(())
}

fn release(gpio: i32) {
    CLAIMED.fetch_and(!(1u64 << gpio), Ordering::AcqRel);
}

fn resolve(name: &str) -> Result<i32> {
    pins::gpio_number(name).ok_or(PeripheralError::new(PeripheralOp::Open, ERR_NOT_FOUND))
}

/// Claim `gpio` and run `setup`; the claim is dropped again if setup fails.
fn claim_with(gpio: i32, setup: impl FnOnce() -> Result<()>) -> Result<()> {
    claim(gpio)?;
    setup().inspect_err(|_| release(gpio))
}

// ── Peripheral manager ────────────────────────────────────────

/// Concrete [`PeripheralManager`] over the board's GPIO matrix.
pub struct HardwarePeripherals;

impl HardwarePeripherals {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HardwarePeripherals {
    fn default() -> Self {
        Self::new()
    }
}

impl PeripheralManager for HardwarePeripherals {
    type Led = GpioLed;
    type Button = GpioButton;

    fn open_output_pin(&mut self, name: &str) -> Result<GpioLed> {
        let gpio = resolve(name)?;
        claim_with(gpio, || hw_init::reset_pin(gpio, PeripheralOp::Open))?;
        Ok(GpioLed { gpio })
    }

    fn open_button(
        &mut self,
        name: &str,
        logic: LogicState,
        key_code: KeyCode,
    ) -> Result<GpioButton> {
        let gpio = resolve(name)?;
        claim_with(gpio, || hw_init::configure_button_input(gpio, logic))?;

        let mut driver = ButtonInputDriver::new(gpio, logic, key_code);
        // Start from the real line state so a held button does not
        // produce a spurious edge on the first poll.
        driver.on_line_level(hw_init::gpio_read(gpio));
        Ok(GpioButton {
            driver,
            isr_attached: false,
        })
    }
}

// ── LED output pin ────────────────────────────────────────────

pub struct GpioLed {
    gpio: i32,
}

impl ErrorType for GpioLed {
    type Error = PeripheralError;
}

impl OutputPin for GpioLed {
    fn set_low(&mut self) -> Result<()> {
        hw_init::gpio_write(self.gpio, false)
    }

    fn set_high(&mut self) -> Result<()> {
        hw_init::gpio_write(self.gpio, true)
    }
}

impl StatefulOutputPin for GpioLed {
    fn is_set_high(&mut self) -> Result<bool> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_set_low(&mut self) -> Result<bool> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}

impl LedPin for GpioLed {
    fn set_direction_out_initially_low(&mut self) -> Result<()> {
        hw_init::configure_output_low(self.gpio)
    }

    fn close(self) -> Result<()> {
        let result = hw_init::reset_pin(self.gpio, PeripheralOp::Close);
        release(self.gpio);
        result
    }
}

// ── Button input ──────────────────────────────────────────────

pub struct GpioButton {
    driver: ButtonInputDriver,
    isr_attached: bool,
}

impl GpioButton {
    fn sample(&mut self) {
        let gpio = self.driver.gpio();
        // A latched ISR level catches presses shorter than one poll.
        if let Some(level) = button::take_isr_level(gpio) {
            self.driver.on_line_level(level);
        }
        self.driver.on_line_level(hw_init::gpio_read(gpio));
    }
}

impl ButtonInput for GpioButton {
    fn register(&mut self) -> Result<()> {
        if !self.isr_attached {
            hw_init::attach_button_isr(self.driver.gpio())?;
            self.isr_attached = true;
        }
        // Discard anything the ISR latched while we were not listening.
        let _ = button::take_isr_level(self.driver.gpio());
        self.driver.on_line_level(hw_init::gpio_read(self.driver.gpio()));
        self.driver.register();
        Ok(())
    }

    fn unregister(&mut self) -> Result<()> {
        self.driver.unregister();
        if self.isr_attached {
            self.isr_attached = false;
            hw_init::detach_button_isr(self.driver.gpio())?;
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Option<KeyEvent> {
        if self.driver.is_registered() {
            self.sample();
        }
        self.driver.poll_event()
    }

    fn close(mut self) -> Result<()> {
        let gpio = self.driver.gpio();
        let unregistered = self.unregister();
        let reset = hw_init::reset_pin(gpio, PeripheralOp::Close);
        release(gpio);
        unregistered.and(reset)
    }
}
