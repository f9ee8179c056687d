use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Tag naming which level-data kind an entity was spawned from.
///
/// Also provides the default draw layer of the kind.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Decoration,
    Wall,
    MovingPlatform,
    DisappearingPlatform,
    Switch,
    Door,
    Spike,
    Spear,
    Boss,
    Player,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Decoration => "decoration",
            Kind::Wall => "wall",
            Kind::MovingPlatform => "moving_platform",
            Kind::DisappearingPlatform => "disappearing_platform",
            Kind::Switch => "switch",
            Kind::Door => "door",
            Kind::Spike => "spike",
            Kind::Spear => "spear",
            Kind::Boss => "boss",
            Kind::Player => "player",
        }
    }

    /// Layer used when the level does not give one. Higher draws on top.
    pub fn default_layer(self) -> i32 {
        match self {
            Kind::Decoration => 0,
            Kind::Wall => 10,
            Kind::MovingPlatform | Kind::DisappearingPlatform => 20,
            Kind::Switch | Kind::Door => 30,
            Kind::Spike | Kind::Spear => 40,
            Kind::Boss => 50,
            Kind::Player => 60,
        }
    }
}
