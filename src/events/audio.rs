use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// Named state transition, the unit of the audio boundary.
///
/// Written once per applied transition by
/// [`sync_state`](crate::systems::statemachine::sync_state). Playback (which
/// sound, looping, delays) is decided by whoever consumes the cue.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct AudioCue {
    pub entity: Entity,
    /// Entity kind that changed state, e.g. `"door"`.
    pub source: &'static str,
    /// Name of the state entered.
    pub state: &'static str,
}
