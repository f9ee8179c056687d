//! Player-controlled body and its state table.

use bevy_ecs::prelude::Component;

use crate::components::statemachine::EntityState;
use crate::geometry::{Rect, Vector2};

/// Horizontal facing of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing that points from `from` toward `to`, keeping `self` when level.
    pub fn toward(self, from: f32, to: f32) -> Self {
        if to < from {
            Facing::Left
        } else if to > from {
            Facing::Right
        } else {
            self
        }
    }

    /// Strike box of width `reach` adjoining `body` on the facing side.
    pub fn reach_box(self, body: &Rect, reach: f32) -> Rect {
        match self {
            Facing::Left => Rect::new(body.left() - reach, body.top(), reach, body.h),
            Facing::Right => Rect::new(body.right(), body.top(), reach, body.h),
        }
    }
}

#[derive(Component, Clone, Debug)]
pub struct Player {
    /// Respawn point (top-left of the collider).
    pub spawn: Vector2,
    pub lives: u32,
    pub facing: Facing,
}

impl Player {
    pub fn new(spawn: Vector2, lives: u32) -> Self {
        Self {
            spawn,
            lives,
            facing: Facing::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Walking,
    Jumping,
    Falling,
    Landing,
    Attacking,
    Hurt,
    Dead,
}

impl PlayerState {
    /// States in which movement input and contacts drive the state.
    pub fn is_mobile(self) -> bool {
        matches!(
            self,
            PlayerState::Idle
                | PlayerState::Walking
                | PlayerState::Jumping
                | PlayerState::Falling
                | PlayerState::Landing
        )
    }

    /// States in which hazard and boss hits are ignored.
    pub fn is_invulnerable(self) -> bool {
        matches!(self, PlayerState::Hurt | PlayerState::Dead)
    }
}

impl EntityState for PlayerState {
    const SOURCE: &'static str = "player";
    const ALL: &'static [Self] = &[
        PlayerState::Idle,
        PlayerState::Walking,
        PlayerState::Jumping,
        PlayerState::Falling,
        PlayerState::Landing,
        PlayerState::Attacking,
        PlayerState::Hurt,
        PlayerState::Dead,
    ];

    fn name(self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Walking => "walking",
            PlayerState::Jumping => "jumping",
            PlayerState::Falling => "falling",
            PlayerState::Landing => "landing",
            PlayerState::Attacking => "attacking",
            PlayerState::Hurt => "hurt",
            PlayerState::Dead => "dead",
        }
    }

    fn allows(self, next: Self) -> bool {
        use PlayerState::*;
        match (self, next) {
            (Dead, _) => false,
            (_, Dead) => true,
            (Hurt, Idle) => true,
            (Hurt, _) => false,
            (_, Hurt) => true,
            (Idle | Walking | Landing, Idle | Walking | Jumping | Falling | Attacking) => true,
            (Jumping, Falling | Landing | Attacking) => true,
            (Falling, Landing | Attacking) => true,
            (Attacking, Idle | Falling) => true,
            _ => false,
        }
    }
}
