//! Raw GPIO access.
//!
//! Thin wrappers over the ESP-IDF `gpio_*` sys calls, one per operation
//! the adapters need.  Every call returns the raw `esp_err_t` wrapped in
//! a [`PeripheralError`] on failure.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: talks to the GPIO matrix directly.
//! On host/test: a per-pin level table stands in for the pads, with
//! pull resistors modelled as the idle level of an input.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::app::keys::LogicState;
use crate::error::{PeripheralError, PeripheralOp, Result};
use crate::pins::MAX_GPIO;

#[cfg(target_os = "espidf")]
fn check(ret: i32, op: PeripheralOp) -> Result<()> {
    if ret == ESP_OK as i32 {
        Ok(())
    } else {
        Err(PeripheralError::new(op, ret))
    }
}

fn check_range(pin: i32, op: PeripheralOp) -> Result<()> {
    if (0..=MAX_GPIO).contains(&pin) {
        Ok(())
    } else {
        Err(PeripheralError::new(op, -1))
    }
}

// ── Pin reset (open / close) ──────────────────────────────────

/// Return the pin to its power-on state (input, no pulls, no interrupt).
#[cfg(target_os = "espidf")]
pub fn reset_pin(pin: i32, op: PeripheralOp) -> Result<()> {
    check_range(pin, op)?;
    // SAFETY: gpio_reset_pin only touches the IO_MUX/GPIO registers of
    // `pin`, which was range-checked above. Main-task only.
    check(unsafe { gpio_reset_pin(pin) }, op)
}

#[cfg(not(target_os = "espidf"))]
pub fn reset_pin(pin: i32, op: PeripheralOp) -> Result<()> {
    check_range(pin, op)?;
    sim::set(pin, false);
    Ok(())
}

// ── Output ────────────────────────────────────────────────────

/// Configure `pin` as output and drive it LOW.
///
/// Input stays enabled so [`gpio_read`] reports the driven pad level.
#[cfg(target_os = "espidf")]
pub fn configure_output_low(pin: i32) -> Result<()> {
    check_range(pin, PeripheralOp::SetDirection)?;
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        ..Default::default()
    };
    // SAFETY: cfg is a valid, fully initialised config for one in-range pin.
    unsafe {
        check(gpio_set_level(pin, 0), PeripheralOp::SetDirection)?;
        check(gpio_config(&cfg), PeripheralOp::SetDirection)?;
        check(gpio_set_level(pin, 0), PeripheralOp::SetDirection)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_output_low(pin: i32) -> Result<()> {
    check_range(pin, PeripheralOp::SetDirection)?;
    sim::set(pin, false);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<()> {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    check(unsafe { gpio_set_level(pin, u32::from(high)) }, PeripheralOp::Write)
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<()> {
    check_range(pin, PeripheralOp::Write)?;
    sim::set(pin, high);
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────

/// Configure `pin` as a button input with the pull matching `logic`
/// and an any-edge interrupt (not yet attached).
#[cfg(target_os = "espidf")]
pub fn configure_button_input(pin: i32, logic: LogicState) -> Result<()> {
    check_range(pin, PeripheralOp::Open)?;
    let (pull_up, pull_down) = match logic {
        LogicState::PressedWhenLow => (
            gpio_pullup_t_GPIO_PULLUP_ENABLE,
            gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        ),
        LogicState::PressedWhenHigh => (
            gpio_pullup_t_GPIO_PULLUP_DISABLE,
            gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        ),
    };
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: pull_up,
        pull_down_en: pull_down,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
        ..Default::default()
    };
    // SAFETY: cfg is a valid, fully initialised config for one in-range pin.
    check(unsafe { gpio_config(&cfg) }, PeripheralOp::Open)
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_button_input(pin: i32, logic: LogicState) -> Result<()> {
    check_range(pin, PeripheralOp::Open)?;
    sim::set(pin, logic.idle_level());
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::get(pin)
}

// ── Button ISR ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(arg: *mut core::ffi::c_void) {
    let pin = arg as usize as i32;
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let high = unsafe { gpio_get_level(pin) } != 0;
    crate::drivers::button::button_isr_handler(pin, high);
}

/// Install the per-pin ISR service (tolerates an existing install) and
/// attach the button handler to `pin`.
#[cfg(target_os = "espidf")]
pub fn attach_button_isr(pin: i32) -> Result<()> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed. The handler only stores to an atomic.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(PeripheralError::new(PeripheralOp::Register, ret));
        }
        check(
            gpio_isr_handler_add(pin, Some(button_gpio_isr), pin as usize as *mut core::ffi::c_void),
            PeripheralOp::Register,
        )?;
        check(gpio_intr_enable(pin), PeripheralOp::Register)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn attach_button_isr(pin: i32) -> Result<()> {
    check_range(pin, PeripheralOp::Register)
}

#[cfg(target_os = "espidf")]
pub fn detach_button_isr(pin: i32) -> Result<()> {
    // SAFETY: removing a handler for a pin we attached; main-task only.
    unsafe {
        check(gpio_intr_disable(pin), PeripheralOp::Unregister)?;
        check(gpio_isr_handler_remove(pin), PeripheralOp::Unregister)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn detach_button_isr(pin: i32) -> Result<()> {
    check_range(pin, PeripheralOp::Unregister)
}

// ── Host pad model ────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicBool, Ordering};

    use crate::pins::MAX_GPIO;

    static LEVELS: [AtomicBool; MAX_GPIO as usize + 1] =
        [const { AtomicBool::new(false) }; MAX_GPIO as usize + 1];

    pub(super) fn set(pin: i32, high: bool) {
        if let Some(level) = usize::try_from(pin).ok().and_then(|i| LEVELS.get(i)) {
            level.store(high, Ordering::Relaxed);
        }
    }

    pub(super) fn get(pin: i32) -> bool {
        usize::try_from(pin)
            .ok()
            .and_then(|i| LEVELS.get(i))
            .is_some_and(|level| level.load(Ordering::Relaxed))
    }

    /// Drive an input pad from outside, as a pressed switch would.
    pub fn drive_input(pin: i32, high: bool) {
        set(pin, high);
    }
}
