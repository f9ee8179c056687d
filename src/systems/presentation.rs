//! End-of-tick presentation systems: camera, dialogue, audio and clock.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::components::statemachine::StateMachine;
use crate::events::audio::AudioCue;
use crate::resources::audio::{AudioBridge, AudioCueLog};
use crate::resources::camera::Camera;
use crate::resources::dialogue::Dialogue;
use crate::resources::levelinfo::LevelInfo;
use crate::resources::worldtime::WorldTime;

/// Centre the camera on the first living player.
pub fn follow_camera(
    players: Query<(&MapPosition, &BoxCollider, &StateMachine<PlayerState>), With<Player>>,
    level: Res<LevelInfo>,
    mut camera: ResMut<Camera>,
) {
    let target = players
        .iter()
        .find(|(.., state)| !state.is(PlayerState::Dead))
        .or_else(|| players.iter().next());
    if let Some((position, collider, _)) = target {
        camera.follow(collider.rect(position.pos).center(), &level.bounds);
    }
}

pub fn update_dialogue(time: Res<WorldTime>, mut dialogue: ResMut<Dialogue>) {
    dialogue.update(time.ticks);
}

/// Forward the cues written this tick to the audio bridge, if one is
/// attached, and keep them in the [`AudioCueLog`].
pub fn forward_audio_cues(
    mut reader: MessageReader<AudioCue>,
    bridge: Option<Res<AudioBridge>>,
    mut log: ResMut<AudioCueLog>,
) {
    log.cues.clear();
    for cue in reader.read() {
        if let Some(bridge) = bridge.as_ref() {
            // Ignore send errors: the playback side may already be gone
            let _ = bridge.tx_cue.send(cue.clone());
        }
        log.cues.push(cue.clone());
    }
}

pub fn advance_time(mut time: ResMut<WorldTime>) {
    time.advance();
}
