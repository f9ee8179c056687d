use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::components::shape::Shape;
use crate::components::statemachine::StateMachine;
use crate::components::switch::{Switch, SwitchState};
use crate::events::messages::SceneMessage;
use crate::resources::channel::MessageChannel;
use log::info;

/// Turn on switches touched by a living player and announce their id.
///
/// The off -> on transition happens once, so the id is posted exactly once.
pub fn activate_switches(
    mut switches: Query<(&Switch, &MapPosition, &Shape, &mut StateMachine<SwitchState>)>,
    players: Query<(&MapPosition, &BoxCollider, &StateMachine<PlayerState>), With<Player>>,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
) {
    for (switch, position, shape, mut machine) in switches.iter_mut() {
        if !machine.is(SwitchState::Off) {
            continue;
        }
        let touched = players.iter().any(|(player_pos, collider, state)| {
            let body = collider.rect(player_pos.pos);
            !state.is(PlayerState::Dead) && shape.world_rects(position.pos).any(|part| part.intersects(&body))
        });
        if touched && machine.transition_to(SwitchState::On) {
            info!("switch {} activated", switch.id);
            channel.post(SceneMessage::SwitchActivated { id: switch.id });
        }
    }
}
