//! Hazard stage: spikes and spears hitting players.
//!
//! Hazards only report hits with `PlayerHit`; what a hit costs is up to the
//! player systems.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::hazard::{Spear, SpearState, Spike};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::components::shape::Shape;
use crate::components::statemachine::StateMachine;
use crate::events::messages::SceneMessage;
use crate::geometry::{Rect, Vector2};
use crate::resources::channel::MessageChannel;

type PlayerBodies<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static MapPosition, &'static BoxCollider, &'static StateMachine<PlayerState>),
    With<Player>,
>;

/// Players whose body overlaps any part of `shape` at `position`.
fn touching_players(players: &PlayerBodies, shape: &Shape, position: Vector2) -> SmallVec<[Entity; 2]> {
    let parts: SmallVec<[Rect; 4]> = shape.world_rects(position).collect();
    players
        .iter()
        .filter(|(_, pos, collider, state)| {
            let body = collider.rect(pos.pos);
            !state.current().is_invulnerable() && parts.iter().any(|part| part.intersects(&body))
        })
        .map(|(entity, ..)| entity)
        .collect()
}

/// Post a hit for every player that started touching a spike this tick.
pub fn update_spikes(
    mut spikes: Query<(Entity, &mut Spike, &MapPosition, &Shape)>,
    players: PlayerBodies,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
) {
    for (source, mut spike, position, shape) in spikes.iter_mut() {
        let touching = touching_players(&players, shape, position.pos);
        for player in &touching {
            if !spike.touching.contains(player) {
                channel.post(SceneMessage::PlayerHit {
                    player: *player,
                    source,
                });
            }
        }
        spike.touching = touching;
    }
}

/// Cycle spears and hit every player inside an extended spear once per phase.
pub fn update_spears(
    mut spears: Query<(Entity, &mut Spear, &mut StateMachine<SpearState>, &MapPosition, &Shape)>,
    players: PlayerBodies,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
) {
    for (source, mut spear, mut machine, position, shape) in spears.iter_mut() {
        match machine.current() {
            SpearState::Retracted => {
                if machine.ticks_in_state() >= spear.retracted_ticks.saturating_add(spear.delay) {
                    machine.transition_to(SpearState::Extended);
                    spear.delay = 0;
                    spear.struck.clear();
                }
            }
            SpearState::Extended => {
                if machine.ticks_in_state() >= spear.extended_ticks {
                    machine.transition_to(SpearState::Retracted);
                }
            }
        }
        if !machine.is(SpearState::Extended) {
            continue;
        }
        for player in touching_players(&players, shape, position.pos) {
            if !spear.struck.contains(&player) {
                spear.struck.push(player);
                channel.post(SceneMessage::PlayerHit { player, source });
            }
        }
    }
}
