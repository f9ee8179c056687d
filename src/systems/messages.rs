use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use crate::events::audio::AudioCue;
use crate::events::messages::{CutsceneMessage, MenuMessage, SceneMessage};
use crate::resources::channel::MessageChannel;

/// Deliver everything posted during the previous tick, in every scope.
pub fn deliver_messages(
    mut menu: ResMut<MessageChannel<MenuMessage>>,
    mut scene: ResMut<MessageChannel<SceneMessage>>,
    mut cutscene: ResMut<MessageChannel<CutsceneMessage>>,
) {
    menu.deliver();
    scene.deliver();
    cutscene.deliver();
}

/// Advance the ECS message queue for [`AudioCue`].
pub fn update_audio_cues(mut cues: ResMut<Messages<AudioCue>>) {
    cues.update();
}
