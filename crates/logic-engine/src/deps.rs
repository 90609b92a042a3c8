//! Contract for the external action executor.
//!
//! The engine decides which named action to run; an [`ActionExecutor`]
//! performs it (tap, swipe, key injection, ...).

use std::error::Error as StdError;

/// Failure reported by an executor. The engine passes it through unchanged.
pub type ActionError = Box<dyn StdError + Send + Sync + 'static>;

/// Direction of a raw input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
}

/// Raw input event forwarded from the host to the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Platform key code.
    pub code: u32,
    /// Press or release.
    pub kind: InputKind,
}

/// Whether the executor claimed an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The executor handled the event; the host should not propagate it.
    Consumed,
    /// The event is not for the executor.
    Ignored,
}

/// Performs primitive automation actions on behalf of the engine.
///
/// Implementations must tolerate the same label being run repeatedly and
/// must not block the caller indefinitely; retries and timeouts are theirs.
pub trait ActionExecutor: Send + Sync {
    /// Perform the action named `label`.
    fn run(&self, label: &str) -> Result<(), ActionError>;

    /// Offer a raw input event to the executor.
    fn handle_input_event(&self, _event: &InputEvent) -> EventDisposition {
        EventDisposition::Ignored
    }
}
