//! Switch-gated door.
//!
//! A door keeps the ids of the switches it still waits for. Each delivered
//! `SwitchActivated` message removes its id; once the set is empty the door
//! opens and never closes again.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashSet;

use crate::components::statemachine::EntityState;

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub id: u32,
    pub waiting: FxHashSet<u32>,
}

impl Door {
    pub fn new(id: u32, waiting: impl IntoIterator<Item = u32>) -> Self {
        Self {
            id,
            waiting: waiting.into_iter().collect(),
        }
    }

    /// Remove a switch id from the waiting set. Returns whether it was waited on.
    pub fn satisfy(&mut self, switch_id: u32) -> bool {
        self.waiting.remove(&switch_id)
    }

    pub fn is_unlocked(&self) -> bool {
        self.waiting.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Waiting,
    Opening,
    Open,
}

impl EntityState for DoorState {
    const SOURCE: &'static str = "door";
    const ALL: &'static [Self] = &[DoorState::Waiting, DoorState::Opening, DoorState::Open];

    fn name(self) -> &'static str {
        match self {
            DoorState::Waiting => "waiting",
            DoorState::Opening => "opening",
            DoorState::Open => "open",
        }
    }

    fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (DoorState::Waiting, DoorState::Opening) | (DoorState::Opening, DoorState::Open)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfy_removes_once() {
        let mut door = Door::new(7, [1, 2]);
        assert!(door.satisfy(1));
        assert!(!door.satisfy(1));
        assert!(!door.is_unlocked());
        assert!(door.satisfy(2));
        assert!(door.is_unlocked());
    }

    #[test]
    fn test_unknown_switch_is_ignored() {
        let mut door = Door::new(1, [4]);
        assert!(!door.satisfy(9));
        assert_eq!(door.waiting.len(), 1);
    }

    #[test]
    fn test_door_is_monotonic() {
        assert!(!DoorState::Open.allows(DoorState::Waiting));
        assert!(!DoorState::Opening.allows(DoorState::Waiting));
        assert!(!DoorState::Waiting.allows(DoorState::Open));
    }
}
