//! State tables for moving and disappearing platforms.
//!
//! The motion data lives in [`Kinematic`](super::solid::Kinematic) and
//! [`Disappearing`](super::solid::Disappearing); these enums only name the
//! phase each platform is in.

use crate::components::statemachine::EntityState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformState {
    /// Heading to the end point.
    Forward,
    /// Heading back to the start point.
    Backward,
}

impl EntityState for PlatformState {
    const SOURCE: &'static str = "platform";
    const ALL: &'static [Self] = &[PlatformState::Forward, PlatformState::Backward];

    fn name(self) -> &'static str {
        match self {
            PlatformState::Forward => "forward",
            PlatformState::Backward => "backward",
        }
    }

    fn allows(self, next: Self) -> bool {
        self != next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisappearingState {
    Solid,
    Shaking,
    Dissolved,
}

impl EntityState for DisappearingState {
    const SOURCE: &'static str = "disappearing_platform";
    const ALL: &'static [Self] = &[
        DisappearingState::Solid,
        DisappearingState::Shaking,
        DisappearingState::Dissolved,
    ];

    fn name(self) -> &'static str {
        match self {
            DisappearingState::Solid => "solid",
            DisappearingState::Shaking => "shaking",
            DisappearingState::Dissolved => "dissolved",
        }
    }

    fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (DisappearingState::Solid, DisappearingState::Shaking)
                | (DisappearingState::Shaking, DisappearingState::Dissolved)
                | (DisappearingState::Dissolved, DisappearingState::Solid)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disappearing_cycle_order() {
        assert!(DisappearingState::Solid.allows(DisappearingState::Shaking));
        assert!(!DisappearingState::Solid.allows(DisappearingState::Dissolved));
        assert!(DisappearingState::Dissolved.allows(DisappearingState::Solid));
    }
}
