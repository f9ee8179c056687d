//! Contact hazards: static spikes and timed spears.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

use crate::components::statemachine::EntityState;

/// Static hazard. Hits a player on the tick contact begins.
#[derive(Component, Clone, Debug, Default)]
pub struct Spike {
    /// Players overlapping the spike on the previous check.
    pub touching: SmallVec<[Entity; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeState {
    Armed,
}

impl EntityState for SpikeState {
    const SOURCE: &'static str = "spike";
    const ALL: &'static [Self] = &[SpikeState::Armed];

    fn name(self) -> &'static str {
        "armed"
    }

    fn allows(self, _next: Self) -> bool {
        false
    }
}

/// Hazard cycling between retracted and extended.
///
/// Only the extended phase hurts, and it hits each player at most once per
/// phase.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Spear {
    pub extended_ticks: u32,
    pub retracted_ticks: u32,
    /// Extra retracted ticks before the first extension.
    pub delay: u32,
    /// Players already hit during the current extended phase.
    pub struck: SmallVec<[Entity; 2]>,
}

impl Spear {
    pub fn new(extended_ticks: u32, retracted_ticks: u32, delay: u32) -> Self {
        Self {
            extended_ticks: extended_ticks.max(1),
            retracted_ticks: retracted_ticks.max(1),
            delay,
            struck: SmallVec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpearState {
    Retracted,
    Extended,
}

impl EntityState for SpearState {
    const SOURCE: &'static str = "spear";
    const ALL: &'static [Self] = &[SpearState::Retracted, SpearState::Extended];

    fn name(self) -> &'static str {
        match self {
            SpearState::Retracted => "retracted",
            SpearState::Extended => "extended",
        }
    }

    fn allows(self, next: Self) -> bool {
        self != next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spear_durations_are_at_least_one_tick() {
        let s = Spear::new(0, 0, 3);
        assert_eq!(s.extended_ticks, 1);
        assert_eq!(s.retracted_ticks, 1);
        assert_eq!(s.delay, 3);
    }
}
