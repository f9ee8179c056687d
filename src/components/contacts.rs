//! Per-tick collision outcome of a body.
//!
//! [`Contacts`] is cleared and recomputed by the body movement system every
//! tick. Controller systems read it on the following tick to decide whether
//! the body may jump, has landed, or is pressed against a wall.

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    pub on_ground: bool,
    pub on_ceiling: bool,
    pub on_wall_left: bool,
    pub on_wall_right: bool,
    /// Solid the body was pushed up out of this tick.
    pub standing_on: Option<Entity>,
    /// `on_ground` from the previous tick, kept for landing detection.
    pub was_on_ground: bool,
}

impl Contacts {
    /// Clear the flags before a new resolution, remembering the ground state.
    pub fn begin_tick(&mut self) {
        let was_on_ground = self.on_ground;
        *self = Self {
            was_on_ground,
            ..Self::default()
        };
    }

    /// Copy the outcome of a resolution, keeping `was_on_ground`.
    pub fn absorb(&mut self, outcome: &Contacts) {
        self.on_ground = outcome.on_ground;
        self.on_ceiling = outcome.on_ceiling;
        self.on_wall_left = outcome.on_wall_left;
        self.on_wall_right = outcome.on_wall_right;
        self.standing_on = outcome.standing_on;
    }

    /// True on the tick `on_ground` went from false to true.
    pub fn just_landed(&self) -> bool {
        self.on_ground && !self.was_on_ground
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_tick_remembers_ground() {
        let mut c = Contacts {
            on_ground: true,
            on_wall_left: true,
            ..Default::default()
        };
        c.begin_tick();
        assert!(!c.on_ground);
        assert!(!c.on_wall_left);
        assert!(c.was_on_ground);
    }

    #[test]
    fn test_just_landed() {
        let mut c = Contacts::default();
        c.begin_tick();
        c.absorb(&Contacts {
            on_ground: true,
            ..Default::default()
        });
        assert!(c.just_landed());
        c.begin_tick();
        c.absorb(&Contacts {
            on_ground: true,
            ..Default::default()
        });
        assert!(!c.just_landed());
    }
}
