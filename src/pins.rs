//! GPIO pin assignments for the LedToggle board.
//!
//! Single source of truth: the default configuration references this
//! module rather than hard-coding pin names.  Change a pin here and it
//! propagates everywhere.

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Output line driving the LED (active HIGH, initially LOW).
pub const LED_PIN_NAME: &str = "BCM6";

// ---------------------------------------------------------------------------
// User button (active-low with pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button.
pub const BUTTON_PIN_NAME: &str = "BCM21";

/// Highest GPIO number on the ESP32-S3.
pub const MAX_GPIO: i32 = 48;

/// Resolve a pin name to a GPIO number.
///
/// Accepts `"BCM<n>"` (Raspberry Pi header naming kept for wiring
/// compatibility), `"GPIO<n>"` and bare `"<n>"`.  Case-insensitive
/// prefix; `None` when the name does not parse or is out of range.
pub fn gpio_number(name: &str) -> Option<i32> {
    let name = name.trim();
    let digits = ["BCM", "GPIO"]
        .iter()
        .find_map(|prefix| {
            name.get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &name[prefix.len()..])
        })
        .unwrap_or(name);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<i32>()
        .ok()
        .filter(|n| (0..=MAX_GPIO).contains(n))
}
