//! Platform stage: kinematic motion, dissolving, and the solid snapshot.
//!
//! Runs after switches, doors and hazards and before any body moves. Once
//! [`collect_solids`] has run, no solid changes for the rest of the tick.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::contacts::Contacts;
use crate::components::mapposition::MapPosition;
use crate::components::platform::{DisappearingState, PlatformState};
use crate::components::rigidbody::RigidBody;
use crate::components::shape::Shape;
use crate::components::solid::{Disappearing, Kinematic, Solid};
use crate::components::statemachine::StateMachine;
use crate::geometry::Vector2;
use crate::resources::solids::{SolidRect, SolidSnapshot};

/// Advance kinematic solids along their ping-pong path.
///
/// Records the displacement of the tick in [`Kinematic::displacement`] and
/// refreshes the cached world rectangles.
pub fn move_platforms(
    mut query: Query<(
        &mut MapPosition,
        &mut Kinematic,
        &mut StateMachine<PlatformState>,
        &Shape,
        &mut Solid,
    )>,
) {
    for (mut position, mut kinematic, mut machine, shape, mut solid) in query.iter_mut() {
        let forward = machine.is(PlatformState::Forward);
        let (next, arrived) = kinematic.advance(position.pos, forward);
        kinematic.displacement = next - position.pos;
        position.pos = next;
        solid.refresh(shape, next);

        if arrived {
            let turn = if forward {
                PlatformState::Backward
            } else {
                PlatformState::Forward
            };
            machine.transition_to(turn);
        }
    }
}

/// Solid -> shaking once a body stands on it, dissolved after the shake,
/// solid again after the dissolved time once no body is inside it.
pub fn dissolve_platforms(
    mut platforms: Query<(
        Entity,
        &Disappearing,
        &mut StateMachine<DisappearingState>,
        &mut Solid,
    )>,
    bodies: Query<(&MapPosition, &BoxCollider, &Contacts, &RigidBody)>,
) {
    for (entity, timings, mut machine, mut solid) in platforms.iter_mut() {
        match machine.current() {
            DisappearingState::Solid => {
                let stood_on = bodies
                    .iter()
                    .any(|(_, _, contacts, _)| contacts.on_ground && contacts.standing_on == Some(entity));
                if stood_on {
                    machine.transition_to(DisappearingState::Shaking);
                }
            }
            DisappearingState::Shaking => {
                if machine.ticks_in_state() >= timings.shake_ticks {
                    machine.transition_to(DisappearingState::Dissolved);
                    solid.enabled = false;
                }
            }
            DisappearingState::Dissolved => {
                if machine.ticks_in_state() < timings.dissolved_ticks {
                    continue;
                }
                let occupied = bodies.iter().any(|(position, collider, _, rigidbody)| {
                    let rect = collider.rect(position.pos);
                    !rigidbody.frozen && solid.world.iter().any(|part| part.intersects(&rect))
                });
                if !occupied {
                    machine.transition_to(DisappearingState::Solid);
                    solid.enabled = true;
                }
            }
        }
    }
}

/// Rebuild the [`SolidSnapshot`] from every enabled solid.
pub fn collect_solids(
    query: Query<(Entity, &Solid, Option<&Kinematic>)>,
    mut snapshot: ResMut<SolidSnapshot>,
) {
    snapshot.rects.clear();
    for (entity, solid, kinematic) in query.iter() {
        if !solid.enabled {
            continue;
        }
        let displacement = kinematic.map(|k| k.displacement).unwrap_or(Vector2::zero());
        snapshot.rects.extend(solid.world.iter().map(|rect| SolidRect {
            entity: Some(entity),
            rect: *rect,
            displacement,
        }));
    }
}
