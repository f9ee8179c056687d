//! Obstacles that block bodies.
//!
//! - [`Solid`] marks an entity whose [`Shape`](super::shape::Shape) blocks
//!   bodies. It caches the world-space rectangles so that the collision
//!   snapshot can be built without recomputing them.
//! - [`Kinematic`] moves a solid back and forth between two points and
//!   records the displacement of the current tick for entrainment.
//! - [`Disappearing`] holds the timings of a platform that dissolves after a
//!   body stands on it.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::shape::Shape;
use crate::geometry::{Rect, Vector2};

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Solid {
    /// Disabled solids are left out of the collision snapshot but still drawn.
    pub enabled: bool,
    /// World-space rectangles, refreshed whenever the entity moves.
    pub world: SmallVec<[Rect; 4]>,
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}

impl Solid {
    pub fn new() -> Self {
        Self {
            enabled: true,
            world: SmallVec::new(),
        }
    }

    /// Recompute the cached world rectangles from a shape at `position`.
    pub fn refresh(&mut self, shape: &Shape, position: Vector2) {
        self.world.clear();
        self.world.extend(shape.world_rects(position));
    }
}

/// Ping-pong linear motion between `start` and `end`.
///
/// Each axis advances by its own `speed` per tick toward the current target
/// and stops exactly on it. An axis with zero speed does not move.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Kinematic {
    pub start: Vector2,
    pub end: Vector2,
    pub speed: Vector2,
    /// Movement applied during the current tick.
    pub displacement: Vector2,
}

impl Kinematic {
    pub fn new(start: Vector2, end: Vector2, speed: Vector2) -> Self {
        Self {
            start,
            end,
            speed: Vector2::new(speed.x.abs(), speed.y.abs()),
            displacement: Vector2::zero(),
        }
    }

    /// Next position when heading to `end` (`forward`) or `start`.
    ///
    /// Returns the new position and whether every moving axis has reached
    /// the target. A platform with no moving axis never reports arrival.
    pub fn advance(&self, position: Vector2, forward: bool) -> (Vector2, bool) {
        let target = if forward { self.end } else { self.start };
        let (x, x_done) = step_axis(position.x, target.x, self.speed.x);
        let (y, y_done) = step_axis(position.y, target.y, self.speed.y);
        let moving = self.speed.x > 0.0 || self.speed.y > 0.0;
        (Vector2::new(x, y), moving && x_done && y_done)
    }
}

/// Move `from` toward `to` by at most `speed`. Zero speed counts as arrived.
fn step_axis(from: f32, to: f32, speed: f32) -> (f32, bool) {
    if speed <= 0.0 {
        return (from, true);
    }
    let gap = to - from;
    if gap.abs() <= speed {
        (to, true)
    } else {
        (from + speed * gap.signum(), false)
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disappearing {
    /// Ticks of shaking between the first contact and dissolving.
    pub shake_ticks: u32,
    /// Ticks the platform stays dissolved before turning solid again.
    pub dissolved_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_translates_parts() {
        let shape = Shape::single(10.0, 5.0);
        let mut solid = Solid::new();
        solid.refresh(&shape, Vector2::new(3.0, 4.0));
        assert_eq!(solid.world.as_slice(), &[Rect::new(3.0, 4.0, 10.0, 5.0)]);
    }

    #[test]
    fn test_advance_stops_on_target() {
        let k = Kinematic::new(Vector2::new(0.0, 0.0), Vector2::new(20.0, 0.0), Vector2::new(8.0, 0.0));
        let (p, done) = k.advance(Vector2::new(0.0, 0.0), true);
        assert_eq!(p, Vector2::new(8.0, 0.0));
        assert!(!done);
        let (p, done) = k.advance(Vector2::new(16.0, 0.0), true);
        assert_eq!(p, Vector2::new(20.0, 0.0));
        assert!(done);
        let (p, _) = k.advance(Vector2::new(20.0, 0.0), false);
        assert_eq!(p, Vector2::new(12.0, 0.0));
    }

    #[test]
    fn test_negative_speed_is_normalized() {
        let k = Kinematic::new(Vector2::zero(), Vector2::new(0.0, 30.0), Vector2::new(0.0, -5.0));
        let (p, _) = k.advance(Vector2::zero(), true);
        assert_eq!(p, Vector2::new(0.0, 5.0));
    }

    #[test]
    fn test_stationary_platform_never_arrives() {
        let k = Kinematic::new(Vector2::zero(), Vector2::new(0.0, 30.0), Vector2::zero());
        let (p, done) = k.advance(Vector2::zero(), true);
        assert_eq!(p, Vector2::zero());
        assert!(!done);
    }
}
