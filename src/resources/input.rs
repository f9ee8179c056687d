//! Per-tick logical input resources.
//!
//! [`InputQueue`] collects the key-down/key-up events the host produced
//! since the last tick, in arrival order. The input stage folds them into
//! [`InputState`], which controller systems read.

use bevy_ecs::prelude::*;

use crate::events::input::{InputAction, InputEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state of one logical action.
pub struct BoolState {
    /// Whether the action is currently held.
    pub active: bool,
    /// Whether the action was pressed this tick.
    pub just_pressed: bool,
    /// Whether the action was released this tick.
    pub just_released: bool,
}

impl BoolState {
    fn apply(&mut self, pressed: bool) {
        if pressed {
            if !self.active {
                self.just_pressed = true;
            }
            self.active = true;
        } else {
            if self.active {
                self.just_released = true;
            }
            self.active = false;
        }
    }

    fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource capturing the per-tick state of the logical actions.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
    pub attack: BoolState,
}

impl InputState {
    pub fn get(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Up => &self.up,
            InputAction::Down => &self.down,
            InputAction::Left => &self.left,
            InputAction::Right => &self.right,
            InputAction::Jump => &self.jump,
            InputAction::Attack => &self.attack,
        }
    }

    fn get_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Up => &mut self.up,
            InputAction::Down => &mut self.down,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Jump => &mut self.jump,
            InputAction::Attack => &mut self.attack,
        }
    }

    /// Start a new tick: forget last tick's press/release edges.
    pub fn begin_tick(&mut self) {
        for action in [
            InputAction::Up,
            InputAction::Down,
            InputAction::Left,
            InputAction::Right,
            InputAction::Jump,
            InputAction::Attack,
        ] {
            self.get_mut(action).clear_edges();
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        self.get_mut(event.action).apply(event.pressed);
    }

    /// -1 when only left is held, +1 when only right is held, else 0.
    pub fn horizontal(&self) -> f32 {
        match (self.left.active, self.right.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Events waiting for the next tick, oldest first.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputQueue {
    pub events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert!(!input.up.active);
        assert!(!input.jump.just_pressed);
        assert!(!input.attack.just_released);
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_press_sets_edge_once() {
        let mut input = InputState::default();
        input.apply(InputEvent::press(InputAction::Jump));
        assert!(input.jump.active);
        assert!(input.jump.just_pressed);
        input.begin_tick();
        input.apply(InputEvent::press(InputAction::Jump));
        assert!(input.jump.active);
        assert!(!input.jump.just_pressed);
    }

    #[test]
    fn test_tap_within_one_tick_keeps_press_edge() {
        let mut input = InputState::default();
        input.apply(InputEvent::press(InputAction::Attack));
        input.apply(InputEvent::release(InputAction::Attack));
        assert!(!input.attack.active);
        assert!(input.attack.just_pressed);
        assert!(input.attack.just_released);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut input = InputState::default();
        input.apply(InputEvent::press(InputAction::Left));
        assert_eq!(input.horizontal(), -1.0);
        input.apply(InputEvent::press(InputAction::Right));
        assert_eq!(input.horizontal(), 0.0);
    }
}
