//! Key events delivered by the button input driver.

use serde::{Deserialize, Serialize};

/// Numeric key code carried by a [`KeyEvent`].
///
/// Values follow the Android `KeyEvent.KEYCODE_*` numbering so a button
/// wired to this board emits the same codes a keyboard would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: Self = Self(66);
    pub const SPACE: Self = Self(62);
}

/// Which half of a press the event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub phase: KeyPhase,
}

impl KeyEvent {
    pub const fn down(code: KeyCode) -> Self {
        Self { code, phase: KeyPhase::Down }
    }

    pub const fn up(code: KeyCode) -> Self {
        Self { code, phase: KeyPhase::Up }
    }
}

/// Electrical polarity of a button line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicState {
    /// Pressed when the line reads LOW (pull-up, switch to ground).
    PressedWhenLow,
    /// Pressed when the line reads HIGH (pull-down, switch to VCC).
    PressedWhenHigh,
}

impl LogicState {
    /// Translate a raw line level into the logical pressed state.
    pub const fn is_pressed(self, line_high: bool) -> bool {
        match self {
            Self::PressedWhenLow => !line_high,
            Self::PressedWhenHigh => line_high,
        }
    }

    /// Line level when the button is released.
    pub const fn idle_level(self) -> bool {
        matches!(self, Self::PressedWhenLow)
    }
}
