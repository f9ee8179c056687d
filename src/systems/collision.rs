//! Axis-separated collision resolution for bodies against solids.
//!
//! [`resolve`] is the pure resolver: it sweeps a body rectangle along X by
//! its horizontal velocity, pushes it out of every solid it now overlaps,
//! then does the same along Y. Flags for the blocked sides and the solid the
//! body stands on come back in a fresh [`Contacts`].
//!
//! A body that already overlaps a solid when the tick starts (a lift rose
//! into its feet, or it respawned inside a moving platform) is first taken
//! out along whichever of the four sides needs the smallest correction.
//! After that, push-out direction follows the direction of travel. When the
//! body does not move on the axis, or still overlaps that solid before the
//! move, the side needing the smaller correction wins. Overlapping solids
//! are handled smallest correction first, each re-checked after the
//! previous push.
//!
//! [`move_bodies`] is the system wrapping it: entrainment by the standing
//! surface, integration, resolution, and writing the results back.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::contacts::Contacts;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::geometry::{Rect, Vector2};
use crate::resources::gameconfig::GameConfig;
use crate::resources::solids::{SolidRect, SolidSnapshot};
use crate::systems::physics::step_velocity;

/// Outcome of resolving one body for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub rect: Rect,
    pub velocity: Vector2,
    pub contacts: Contacts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn coord(self, rect: &Rect) -> f32 {
        match self {
            Axis::X => rect.x,
            Axis::Y => rect.y,
        }
    }

    fn set_coord(self, rect: &mut Rect, value: f32) {
        match self {
            Axis::X => rect.x = value,
            Axis::Y => rect.y = value,
        }
    }

    /// Coordinate placing `body` just before `solid` (left of it, or on top).
    fn before(self, body: &Rect, solid: &Rect) -> f32 {
        match self {
            Axis::X => solid.left() - body.w,
            Axis::Y => solid.top() - body.h,
        }
    }

    /// Coordinate placing `body` just after `solid` (right of it, or below).
    fn after(self, solid: &Rect) -> f32 {
        match self {
            Axis::X => solid.right(),
            Axis::Y => solid.bottom(),
        }
    }
}

/// Coordinate along `axis` that takes `body` out of `solid`.
fn push_out(body: &Rect, solid: &Rect, axis: Axis, delta: f32, embedded: bool) -> f32 {
    let before = axis.before(body, solid);
    let after = axis.after(solid);
    if !embedded && delta > 0.0 {
        return before;
    }
    if !embedded && delta < 0.0 {
        return after;
    }
    let current = axis.coord(body);
    if (before - current).abs() <= (after - current).abs() {
        before
    } else {
        after
    }
}

fn skipped(solid: &SolidRect, skip: Option<Entity>) -> bool {
    skip.is_some() && solid.entity == skip
}

/// Smallest move taking `body` out of `solid` along any of the four sides.
fn minimum_translation(body: &Rect, solid: &Rect) -> (Axis, f32) {
    [
        (Axis::X, Axis::X.before(body, solid)),
        (Axis::X, Axis::X.after(solid)),
        (Axis::Y, Axis::Y.before(body, solid)),
        (Axis::Y, Axis::Y.after(solid)),
    ]
    .into_iter()
    .min_by(|a, b| {
        let da = (a.1 - a.0.coord(body)).abs();
        let db = (b.1 - b.0.coord(body)).abs();
        da.total_cmp(&db)
    })
    .unwrap_or((Axis::Y, body.y))
}

fn record_push(contacts: &mut Contacts, axis: Axis, pushed_back: bool, solid: &SolidRect) {
    match (axis, pushed_back) {
        (Axis::X, true) => contacts.on_wall_right = true,
        (Axis::X, false) => contacts.on_wall_left = true,
        (Axis::Y, true) => {
            contacts.on_ground = true;
            contacts.standing_on = solid.entity;
        }
        (Axis::Y, false) => contacts.on_ceiling = true,
    }
}

/// Take `rect` out of every solid it overlaps before moving.
fn depenetrate(rect: &mut Rect, solids: &[SolidRect], skip: Option<Entity>, contacts: &mut Contacts) {
    let mut hits: SmallVec<[(f32, &SolidRect); 4]> = solids
        .iter()
        .filter(|s| !skipped(s, skip) && rect.intersects(&s.rect))
        .map(|s| {
            let (axis, target) = minimum_translation(rect, &s.rect);
            ((target - axis.coord(rect)).abs(), s)
        })
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, solid) in hits {
        if !rect.intersects(&solid.rect) {
            continue;
        }
        let (axis, target) = minimum_translation(rect, &solid.rect);
        let pushed_back = target < axis.coord(rect);
        axis.set_coord(rect, target);
        record_push(contacts, axis, pushed_back, solid);
    }
}

/// Move `rect` by `delta` along `axis` and push it out of the solids it hits.
///
/// Returns whether any solid blocked the move.
fn sweep(
    rect: &mut Rect,
    delta: f32,
    axis: Axis,
    solids: &[SolidRect],
    skip: Option<Entity>,
    contacts: &mut Contacts,
) -> bool {
    let start = *rect;
    let moved = axis.coord(rect) + delta;
    axis.set_coord(rect, moved);

    let mut hits: SmallVec<[(f32, &SolidRect); 4]> = solids
        .iter()
        .filter(|s| !skipped(s, skip) && rect.intersects(&s.rect))
        .map(|s| {
            let target = push_out(rect, &s.rect, axis, delta, start.intersects(&s.rect));
            ((target - moved).abs(), s)
        })
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut blocked = false;
    for (_, solid) in hits {
        if !rect.intersects(&solid.rect) {
            continue;
        }
        let current = axis.coord(rect);
        let target = push_out(rect, &solid.rect, axis, delta, start.intersects(&solid.rect));
        axis.set_coord(rect, target);
        blocked = true;

        record_push(contacts, axis, target < current, solid);
    }
    blocked
}

/// Resolve a body rectangle moving by `velocity` against `solids`.
///
/// Rectangles owned by `skip` are ignored, so a body that is also a solid
/// never collides with itself. Never fails: with nothing in the way the
/// rectangle simply moves and the flags stay clear.
pub fn resolve(body: Rect, velocity: Vector2, solids: &[SolidRect], skip: Option<Entity>) -> Resolution {
    let mut rect = body;
    let mut velocity = velocity;
    let mut contacts = Contacts::default();

    depenetrate(&mut rect, solids, skip, &mut contacts);
    if sweep(&mut rect, velocity.x, Axis::X, solids, skip, &mut contacts) {
        velocity.x = 0.0;
    }
    if sweep(&mut rect, velocity.y, Axis::Y, solids, skip, &mut contacts) {
        velocity.y = 0.0;
    }

    Resolution {
        rect,
        velocity,
        contacts,
    }
}

/// Move every body one tick through the solid snapshot.
///
/// A body standing on a solid at the end of the previous tick first
/// receives that solid's displacement for this tick, then gravity, the
/// speed clamp and its own velocity apply, and the result is resolved.
pub fn move_bodies(
    mut query: Query<(Entity, &mut MapPosition, &mut RigidBody, &BoxCollider, &mut Contacts)>,
    snapshot: Res<SolidSnapshot>,
    config: Res<GameConfig>,
) {
    for (entity, mut position, mut rigidbody, collider, mut contacts) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }

        let mut pos = position.pos;
        if let Some(surface) = contacts.standing_on {
            pos += snapshot.displacement_of(surface);
        }

        let velocity = step_velocity(rigidbody.velocity, &config.physics);
        let outcome = resolve(collider.rect(pos), velocity, &snapshot.rects, Some(entity));

        position.pos = collider.position_of(&outcome.rect);
        rigidbody.velocity = outcome.velocity;
        contacts.begin_tick();
        contacts.absorb(&outcome.contacts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> SolidRect {
        SolidRect::fixed(Rect::new(0.0, 100.0, 200.0, 20.0))
    }

    #[test]
    fn test_free_move_keeps_flags_clear() {
        let body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let out = resolve(body, Vector2::new(3.0, 4.0), &[floor()], None);
        assert_eq!(out.rect, Rect::new(3.0, 4.0, 10.0, 10.0));
        assert_eq!(out.velocity, Vector2::new(3.0, 4.0));
        assert_eq!(out.contacts, Contacts::default());
    }

    #[test]
    fn test_falling_body_snaps_onto_top() {
        let body = Rect::new(50.0, 89.5, 10.0, 10.0);
        let out = resolve(body, Vector2::new(0.0, 0.8), &[floor()], None);
        assert_eq!(out.rect.y, 100.0 - 10.0);
        assert!(out.contacts.on_ground);
        assert_eq!(out.velocity.y, 0.0);
    }

    #[test]
    fn test_rising_body_hits_ceiling() {
        let ceiling = SolidRect::fixed(Rect::new(0.0, 0.0, 200.0, 20.0));
        let body = Rect::new(50.0, 25.0, 10.0, 10.0);
        let out = resolve(body, Vector2::new(0.0, -8.0), &[ceiling], None);
        assert_eq!(out.rect.y, 20.0);
        assert!(out.contacts.on_ceiling);
        assert!(!out.contacts.on_ground);
    }

    #[test]
    fn test_walls_block_by_direction() {
        let wall = SolidRect::fixed(Rect::new(100.0, 0.0, 20.0, 100.0));
        let right = resolve(Rect::new(85.0, 10.0, 10.0, 10.0), Vector2::new(8.0, 0.0), &[wall], None);
        assert_eq!(right.rect.x, 90.0);
        assert!(right.contacts.on_wall_right);
        assert_eq!(right.velocity.x, 0.0);

        let left = resolve(Rect::new(125.0, 10.0, 10.0, 10.0), Vector2::new(-8.0, 0.0), &[wall], None);
        assert_eq!(left.rect.x, 120.0);
        assert!(left.contacts.on_wall_left);
    }

    #[test]
    fn test_walking_across_tile_seams_does_not_snag() {
        let tiles: Vec<SolidRect> = (0..4)
            .map(|i| SolidRect::fixed(Rect::new(i as f32 * 32.0, 100.0, 32.0, 32.0)))
            .collect();
        let mut body = Rect::new(10.0, 90.0, 10.0, 10.0);
        for _ in 0..20 {
            let out = resolve(body, Vector2::new(4.0, 0.8), &tiles, None);
            assert!(!out.contacts.on_wall_left && !out.contacts.on_wall_right);
            assert!(out.contacts.on_ground);
            assert_eq!(out.rect.y, 90.0);
            body = out.rect;
        }
        assert_eq!(body.x, 90.0);
    }

    #[test]
    fn test_thin_solid_is_not_tunneled_at_max_speed() {
        let plank = SolidRect::fixed(Rect::new(0.0, 100.0, 200.0, 4.0));
        let body = Rect::new(50.0, 75.0, 10.0, 24.0);
        let out = resolve(body, Vector2::new(0.0, 20.0), &[plank], None);
        assert_eq!(out.rect.bottom(), 100.0);
        assert!(out.contacts.on_ground);
    }

    #[test]
    fn test_deepest_blocker_wins_when_several_overlap() {
        let near = SolidRect::fixed(Rect::new(105.0, 0.0, 10.0, 50.0));
        let far = SolidRect::fixed(Rect::new(110.0, 0.0, 10.0, 50.0));
        let body = Rect::new(90.0, 10.0, 10.0, 10.0);
        let out = resolve(body, Vector2::new(15.0, 0.0), &[far, near], None);
        assert_eq!(out.rect.right(), 105.0);
    }

    #[test]
    fn test_embedded_body_takes_minimum_translation() {
        let block = SolidRect::fixed(Rect::new(0.0, 0.0, 100.0, 100.0));
        let body = Rect::new(95.0, 40.0, 10.0, 10.0);
        let out = resolve(body, Vector2::zero(), &[block], None);
        assert_eq!(out.rect.x, 100.0);
        assert!(out.contacts.on_wall_left);
        assert!(!out.rect.intersects(&block.rect));
    }

    #[test]
    fn test_lift_overlapping_feet_lifts_body_instead_of_shoving_it() {
        let mut world = World::new();
        let lift = world.spawn_empty().id();
        let solid = SolidRect {
            entity: Some(lift),
            rect: Rect::new(0.0, 299.4, 96.0, 16.0),
            displacement: Vector2::new(0.0, -0.7),
        };
        let body = Rect::new(10.0, 252.1, 28.0, 48.0);
        let out = resolve(body, Vector2::new(0.0, 0.8), &[solid], None);
        assert_eq!(out.rect.x, 10.0);
        assert!((out.rect.bottom() - solid.rect.top()).abs() < 1e-4);
        assert!(out.contacts.on_ground);
        assert!(!out.contacts.on_wall_left && !out.contacts.on_wall_right);
        assert_eq!(out.contacts.standing_on, Some(lift));
        assert_eq!(out.velocity.y, 0.0);
    }

    #[test]
    fn test_overlap_at_start_takes_the_shortest_way_out() {
        let block = SolidRect::fixed(Rect::new(0.0, 100.0, 200.0, 40.0));
        let sunk = resolve(Rect::new(60.0, 58.0, 10.0, 44.0), Vector2::new(-4.0, 0.0), &[block], None);
        assert_eq!(sunk.rect.bottom(), 100.0);
        assert_eq!(sunk.rect.x, 56.0);
        assert!(sunk.contacts.on_ground);

        let bumped = resolve(Rect::new(60.0, 139.0, 10.0, 10.0), Vector2::zero(), &[block], None);
        assert_eq!(bumped.rect.y, 140.0);
        assert!(bumped.contacts.on_ceiling);
        assert!(!bumped.contacts.on_ground);
    }

    #[test]
    fn test_skip_ignores_own_rectangles() {
        let mut world = World::new();
        let body_entity = world.spawn_empty().id();
        let bodies_solid = SolidRect {
            entity: Some(body_entity),
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            displacement: Vector2::zero(),
        };
        let out = resolve(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Vector2::new(0.0, 1.0),
            &[bodies_solid],
            bodies_solid.entity,
        );
        assert_eq!(out.rect.y, 1.0);
        assert!(!out.contacts.on_ground);
    }

    #[test]
    fn test_standing_surface_is_recorded() {
        let mut world = World::new();
        let platform = world.spawn_empty().id();
        let solid = SolidRect {
            entity: Some(platform),
            rect: Rect::new(0.0, 100.0, 50.0, 10.0),
            displacement: Vector2::zero(),
        };
        let out = resolve(Rect::new(10.0, 90.0, 10.0, 10.0), Vector2::new(0.0, 0.8), &[solid], None);
        assert_eq!(out.contacts.standing_on, Some(platform));
    }

    #[test]
    fn test_resolved_rect_never_overlaps() {
        let solids = [
            floor(),
            SolidRect::fixed(Rect::new(60.0, 60.0, 40.0, 40.0)),
            SolidRect::fixed(Rect::new(0.0, 0.0, 10.0, 100.0)),
        ];
        let starts = [
            (Rect::new(40.0, 40.0, 16.0, 16.0), Vector2::new(12.0, 12.0)),
            (Rect::new(20.0, 80.0, 16.0, 16.0), Vector2::new(-15.0, 5.0)),
            (Rect::new(100.0, 40.0, 16.0, 16.0), Vector2::new(-20.0, 20.0)),
            (Rect::new(150.0, 70.0, 16.0, 16.0), Vector2::new(-20.0, -3.0)),
        ];
        for (body, velocity) in starts {
            let out = resolve(body, velocity, &solids, None);
            for solid in &solids {
                assert!(!out.rect.intersects(&solid.rect), "{:?} overlaps {:?}", out.rect, solid.rect);
            }
        }
    }
}
