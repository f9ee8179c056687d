use bevy_ecs::prelude::Component;

use crate::components::statemachine::EntityState;

/// Pressure switch activated by a player touching it.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switch {
    pub id: u32,
}

/// Off -> On, once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Off,
    On,
}

impl EntityState for SwitchState {
    const SOURCE: &'static str = "switch";
    const ALL: &'static [Self] = &[SwitchState::Off, SwitchState::On];

    fn name(self) -> &'static str {
        match self {
            SwitchState::Off => "off",
            SwitchState::On => "on",
        }
    }

    fn allows(self, next: Self) -> bool {
        matches!((self, next), (SwitchState::Off, SwitchState::On))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_never_resets() {
        assert!(SwitchState::Off.allows(SwitchState::On));
        assert!(!SwitchState::On.allows(SwitchState::Off));
    }
}
