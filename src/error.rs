//! Error types for the LedToggle firmware.
//!
//! Every peripheral call (open, configure, read, write, register, close)
//! fails with the same [`PeripheralError`].  The controller never
//! propagates it: each failure is caught where it happens, reported
//! through the event sink, and the affected handle is left absent.
//! The type is `Copy` so it can ride inside [`AppEvent`](crate::app::events::AppEvent)
//! without allocation.

use core::fmt;

use embedded_hal::digital::ErrorKind;

// ---------------------------------------------------------------------------
// Peripheral I/O failure
// ---------------------------------------------------------------------------

/// The peripheral operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralOp {
    /// Claiming the GPIO line.
    Open,
    /// Switching the line to output, initially low.
    SetDirection,
    /// Reading the current line level.
    Read,
    /// Driving the line level.
    Write,
    /// Arming the button so it delivers key events.
    Register,
    /// Disarming the button.
    Unregister,
    /// Releasing the GPIO line.
    Close,
}

impl fmt::Display for PeripheralOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::SetDirection => write!(f, "set direction"),
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Register => write!(f, "register"),
            Self::Unregister => write!(f, "unregister"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// A peripheral I/O failure.
///
/// `code` is the raw status returned by the platform (an `esp_err_t` on
/// the device); `0` when the failure has no native code, e.g. using a
/// handle that was already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralError {
    pub op: PeripheralOp,
    pub code: i32,
}

impl PeripheralError {
    pub const fn new(op: PeripheralOp, code: i32) -> Self {
        Self { op, code }
    }

    /// Failure with no platform status code attached.
    pub const fn io(op: PeripheralOp) -> Self {
        Self { op, code: 0 }
    }
}

impl fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code == 0 {
            write!(f, "peripheral {} failed", self.op)
        } else {
            write!(f, "peripheral {} failed (rc={})", self.op, self.code)
        }
    }
}

impl std::error::Error for PeripheralError {}

impl embedded_hal::digital::Error for PeripheralError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`ControllerConfig::validate`](crate::config::ControllerConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A pin name is empty.
    EmptyPinName(&'static str),
    /// A pin name does not map to a GPIO on this board.
    UnknownPin(&'static str),
    /// Input and output were assigned the same line.
    PinConflict,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPinName(field) => write!(f, "{field} is empty"),
            Self::UnknownPin(field) => write!(f, "{field} does not name a GPIO"),
            Self::PinConflict => write!(f, "input and output pins must differ"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Peripheral-layer `Result` alias.
pub type Result<T> = core::result::Result<T, PeripheralError>;
