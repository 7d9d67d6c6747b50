//! Button input driver: line level changes → key events.
//!
//! ## Hardware
//!
//! Momentary switch on one GPIO.  Polarity comes from [`LogicState`]:
//! the default wiring is active-low with a pull-up.  The GPIO fires on
//! any edge; the ISR publishes the sampled line level into an atomic,
//! and the main loop hands it to [`ButtonInputDriver::on_line_level`].
//!
//! ## Event generation
//!
//! | Transition         | Registered | Event                  |
//! |--------------------|------------|------------------------|
//! | released → pressed | yes        | `KeyEvent::down(code)` |
//! | pressed → released | yes        | `KeyEvent::up(code)`   |
//! | any                | no         | none (state tracked)   |
//!
//! Repeated samples at the same level produce nothing.

use core::sync::atomic::{AtomicU8, Ordering};

use heapless::Deque;
use log::warn;

use crate::app::keys::{KeyCode, KeyEvent, LogicState};
use crate::pins::MAX_GPIO;

/// Pending key events held between main-loop polls.
const EVENT_QUEUE_CAP: usize = 8;

const ISR_NONE: u8 = 0;
const ISR_LOW: u8 = 1;
const ISR_HIGH: u8 = 2;

/// Latest line level seen by the ISR per GPIO, consumed by the main loop.
static BUTTON_ISR_LEVEL: [AtomicU8; MAX_GPIO as usize + 1] =
    [const { AtomicU8::new(ISR_NONE) }; MAX_GPIO as usize + 1];

pub struct ButtonInputDriver {
    gpio: i32,
    logic: LogicState,
    key_code: KeyCode,
    registered: bool,
    pressed: bool,
    pending: Deque<KeyEvent, EVENT_QUEUE_CAP>,
    dropped: u32,
}

impl ButtonInputDriver {
    /// The button starts released.
    pub fn new(gpio: i32, logic: LogicState, key_code: KeyCode) -> Self {
        Self {
            gpio,
            logic,
            key_code,
            registered: false,
            pressed: false,
            pending: Deque::new(),
            dropped: 0,
        }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn register(&mut self) {
        self.registered = true;
    }

    /// Stop delivering events and drop any that were still queued.
    pub fn unregister(&mut self) {
        self.registered = false;
        self.pending.clear();
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Feed one sampled line level.
    pub fn on_line_level(&mut self, line_high: bool) {
        let pressed = self.logic.is_pressed(line_high);
        if pressed == self.pressed {
            return;
        }
        self.pressed = pressed;

        if !self.registered {
            return;
        }
        let event = if pressed {
            KeyEvent::down(self.key_code)
        } else {
            KeyEvent::up(self.key_code)
        };
        if self.pending.push_back(event).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!(
                "button GPIO{}: event queue full, dropped {:?} ({} lost)",
                self.gpio, event, self.dropped
            );
        }
    }

    pub fn poll_event(&mut self) -> Option<KeyEvent> {
        self.pending.pop_front()
    }
}

fn isr_slot(gpio: i32) -> Option<&'static AtomicU8> {
    usize::try_from(gpio).ok().and_then(|i| BUTTON_ISR_LEVEL.get(i))
}

/// ISR handler: register this on the button GPIO for any edge.
/// Safe to call from interrupt context (lock-free atomic store).
#[allow(unused)]
pub fn button_isr_handler(gpio: i32, line_high: bool) {
    let level = if line_high { ISR_HIGH } else { ISR_LOW };
    if let Some(slot) = isr_slot(gpio) {
        slot.store(level, Ordering::Release);
    }
}

/// Take the level the ISR published for `gpio` since the last call.
pub fn take_isr_level(gpio: i32) -> Option<bool> {
    match isr_slot(gpio)?.swap(ISR_NONE, Ordering::AcqRel) {
        ISR_LOW => Some(false),
        ISR_HIGH => Some(true),
        _ => None,
    }
}
