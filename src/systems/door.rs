use bevy_ecs::prelude::*;
use log::info;

use crate::components::door::{Door, DoorState};
use crate::components::solid::Solid;
use crate::components::statemachine::StateMachine;
use crate::events::messages::SceneMessage;
use crate::resources::channel::MessageChannel;
use crate::resources::gameconfig::GameConfig;

/// Apply delivered switch activations to every door and advance door states.
///
/// - waiting -> opening once the waiting set is empty
/// - opening -> open after the configured opening time; the door stops
///   blocking and `DoorOpened` is posted
pub fn update_doors(
    mut doors: Query<(&mut Door, &mut StateMachine<DoorState>, &mut Solid)>,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
    config: Res<GameConfig>,
) {
    let activated: Vec<u32> = channel
        .iter()
        .filter_map(|message| match message {
            SceneMessage::SwitchActivated { id } => Some(*id),
            _ => None,
        })
        .collect();

    for (mut door, mut machine, mut solid) in doors.iter_mut() {
        for id in &activated {
            door.satisfy(*id);
        }
        match machine.current() {
            DoorState::Waiting => {
                if door.is_unlocked() {
                    machine.transition_to(DoorState::Opening);
                }
            }
            DoorState::Opening => {
                if machine.ticks_in_state() >= config.door.opening_ticks {
                    machine.transition_to(DoorState::Open);
                    solid.enabled = false;
                    info!("door {} open", door.id);
                    channel.post(SceneMessage::DoorOpened { id: door.id });
                }
            }
            DoorState::Open => {}
        }
    }
}
