//! Controller lifecycle state machine.
//!
//! ```text
//!   create ─────▶ Created
//!   Created ─start──▶ Started      Stopped ─start──▶ Started
//!   Created ─stop───▶ Stopped      Started ─stop───▶ Stopped
//!   Created ─destroy─▶ Destroyed   Started ─destroy─▶ Destroyed
//!   Stopped ─destroy─▶ Destroyed
//! ```
//!
//! `stop` and `destroy` are accepted from every live state, including a
//! controller whose peripherals only partially opened.  Only calls that
//! would re-register or revive a destroyed controller are refused.

/// Where the controller is in its host-driven lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Created,
    Started,
    Stopped,
    Destroyed,
}

/// Lifecycle entry points the host can invoke after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Stop,
    Destroy,
}

/// Outcome of applying a [`Transition`] to a [`LifecycleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move to the given state and run the transition's side effects.
    Enter(LifecycleState),
    /// Already there; nothing to do.
    Stay,
    /// Not allowed from the current state.
    Refuse,
}

impl LifecycleState {
    pub fn step(self, transition: Transition) -> Step {
        use LifecycleState::{Created, Destroyed, Started, Stopped};

        match (self, transition) {
            (Created | Stopped, Transition::Start) => Step::Enter(Started),
            (Started | Destroyed, Transition::Start) => Step::Refuse,

            (Created | Started, Transition::Stop) => Step::Enter(Stopped),
            (Stopped, Transition::Stop) => Step::Stay,
            (Destroyed, Transition::Stop) => Step::Refuse,

            (Created | Started | Stopped, Transition::Destroy) => Step::Enter(Destroyed),
            (Destroyed, Transition::Destroy) => Step::Stay,
        }
    }

    /// Whether peripherals may still be touched.
    pub fn is_live(self) -> bool {
        self != Self::Destroyed
    }
}
