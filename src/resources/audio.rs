//! Bridge between the scene and an external audio playback thread.
//!
//! Use [`setup_audio`] once per scene to register the [`AudioBridge`]
//! resource; the returned receiver belongs to the playback side. Call
//! [`shutdown_audio`] to detach it.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::audio::AudioCue;

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource, Debug, Clone)]
pub struct AudioBridge {
    /// Sender for [`AudioCue`] messages (ECS -> audio thread).
    pub tx_cue: Sender<AudioCue>,
}

/// Register an [`AudioBridge`] and hand back the playback end.
pub fn setup_audio(world: &mut World) -> Receiver<AudioCue> {
    let (tx_cue, rx_cue) = unbounded::<AudioCue>();
    world.insert_resource(AudioBridge { tx_cue });
    rx_cue
}

/// Detach the bridge. The playback side sees its channel disconnect.
pub fn shutdown_audio(world: &mut World) {
    world.remove_resource::<AudioBridge>();
}

/// Cues forwarded during the last tick, kept for hosts without a bridge.
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioCueLog {
    pub cues: Vec<AudioCue>,
}
