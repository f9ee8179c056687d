//! Target-tracking boss.
//!
//! The boss is both a body (it falls and collides like the player) and a
//! solid (players can stand on it) until it dies. Its brain lives in
//! [`crate::systems::boss`].

use bevy_ecs::prelude::{Component, Entity};

use crate::components::player::Facing;
use crate::components::statemachine::EntityState;

#[derive(Component, Clone, Debug)]
pub struct Boss {
    pub health: u32,
    /// Player currently tracked, picked again every tick.
    pub target: Option<Entity>,
    /// Ticks left before another attack may start.
    pub cooldown: u32,
    pub facing: Facing,
    /// Whether the current attack already landed its strike.
    pub struck: bool,
}

impl Boss {
    pub fn new(health: u32) -> Self {
        Self {
            health,
            target: None,
            cooldown: 0,
            facing: Facing::Left,
            struck: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Idle,
    Chase,
    Attack,
    Hurt,
    Dead,
}

impl EntityState for BossState {
    const SOURCE: &'static str = "boss";
    const ALL: &'static [Self] = &[
        BossState::Idle,
        BossState::Chase,
        BossState::Attack,
        BossState::Hurt,
        BossState::Dead,
    ];

    fn name(self) -> &'static str {
        match self {
            BossState::Idle => "idle",
            BossState::Chase => "chase",
            BossState::Attack => "attack",
            BossState::Hurt => "hurt",
            BossState::Dead => "dead",
        }
    }

    fn allows(self, next: Self) -> bool {
        use BossState::*;
        match (self, next) {
            (Dead, _) => false,
            (_, Dead) => true,
            (Hurt, Idle | Chase) => true,
            (Hurt, _) => false,
            (_, Hurt) => true,
            (Idle, Chase | Attack) => true,
            (Chase, Idle | Attack) => true,
            (Attack, Idle | Chase) => true,
            _ => false,
        }
    }
}
