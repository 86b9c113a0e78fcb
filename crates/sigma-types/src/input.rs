//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these enums. The game logic never
//! sees raw platform input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key pressed (key-down only; the game has no held-key behavior).
    ButtonPress(Button),
    /// User requested quit (window close, etc.).
    Quit,
}

/// Logical buttons the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Confirm,
    Cancel,
    Mute,
}
