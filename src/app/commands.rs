//! Inbound lifecycle commands.
//!
//! A host driver (the firmware main loop or a test harness) can replay a
//! lifecycle as a sequence of these instead of calling each entry point
//! on the [`PeripheralController`](super::service::PeripheralController)
//! by hand.

use super::keys::KeyEvent;

/// Calls the host delivers after the controller has been created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// Controller becomes visible: arm the button.
    Start,

    /// Controller is hidden: disarm the button.
    Stop,

    /// A raw key event from the input layer.
    Key(KeyEvent),

    /// Release every peripheral.
    Destroy,
}
