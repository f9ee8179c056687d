//! Input action events.
//!
//! This module defines [`InputEvent`], a discrete key-down or key-up of one
//! of the logical [`InputAction`]s. Hosts push them into the
//! [`InputQueue`](crate::resources::input::InputQueue); the input stage folds
//! the queue, in order, into the
//! [`InputState`](crate::resources::input::InputState) resource once per tick.

use serde::{Deserialize, Serialize};

/// Enumeration of logical input actions.
///
/// These abstract the physical keys into gameplay-meaningful actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Attack,
}

/// Event emitted when an input action is pressed or released.
///
/// The `action` field identifies which logical action occurred, and `pressed`
/// indicates whether it was a press (true) or release (false).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(action: InputAction) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub fn release(action: InputAction) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}
