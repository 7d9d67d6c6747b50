//! Port traits: the hexagonal boundary between the controller and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PeripheralController (domain)
//! ```
//!
//! Driven adapters (GPIO, button driver, event sinks) implement these
//! traits.  The [`PeripheralController`](super::service::PeripheralController)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! All peripheral operations return [`PeripheralError`]; the controller
//! handles every failure at the call site.

use embedded_hal::digital::StatefulOutputPin;

use crate::error::{PeripheralError, Result};

use super::keys::{KeyCode, KeyEvent, LogicState};

// ───────────────────────────────────────────────────────────────
// Peripheral manager (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Opens peripheral handles by pin name.
///
/// Each returned handle holds the line exclusively until it is closed.
pub trait PeripheralManager {
    type Led: LedPin;
    type Button: ButtonInput;

    /// Claim a GPIO line for output.  Direction is set separately via
    /// [`LedPin::set_direction_out_initially_low`].
    fn open_output_pin(&mut self, name: &str) -> Result<Self::Led>;

    /// Construct a button driver on `name` that emits `key_code`.
    fn open_button(
        &mut self,
        name: &str,
        logic: LogicState,
        key_code: KeyCode,
    ) -> Result<Self::Button>;
}

// ───────────────────────────────────────────────────────────────
// LED output pin
// ───────────────────────────────────────────────────────────────

/// A GPIO output line.
///
/// Level access goes through [`StatefulOutputPin`]: `is_set_high` queries
/// the hardware each time, nothing is cached on this side of the port.
pub trait LedPin: StatefulOutputPin<Error = PeripheralError> + Sized {
    /// Configure the line as output and drive it LOW immediately.
    fn set_direction_out_initially_low(&mut self) -> Result<()>;

    /// Release the line.
    fn close(self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Button input driver
// ───────────────────────────────────────────────────────────────

/// A button that turns line changes into [`KeyEvent`]s.
///
/// Events are only produced between [`register`](Self::register) and
/// [`unregister`](Self::unregister).
pub trait ButtonInput: Sized {
    fn register(&mut self) -> Result<()>;

    fn unregister(&mut self) -> Result<()>;

    /// Next pending key event, if any.  Never blocks.
    fn poll_event(&mut self) -> Option<KeyEvent>;

    /// Release the line.  Unregisters first if still registered.
    fn close(self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
