//! End-of-tick bookkeeping for [`StateMachine`] components.
//!
//! [`sync_state`] is registered once per state type in the presentation
//! stage. For each entity it:
//!
//! 1. drains the transitions applied during the tick and writes one
//!    [`AudioCue`] per transition, oldest first;
//! 2. mirrors the current state name into [`StateLabel`];
//! 3. counts the tick in `ticks_in_state`.

use bevy_ecs::prelude::*;

use crate::components::statemachine::{EntityState, StateLabel, StateMachine};
use crate::events::audio::AudioCue;

pub fn sync_state<S: EntityState>(
    mut query: Query<(Entity, &mut StateMachine<S>, &mut StateLabel)>,
    mut cues: MessageWriter<AudioCue>,
) {
    for (entity, mut machine, mut label) in query.iter_mut() {
        for (_, entered) in machine.drain_transitions() {
            cues.write(AudioCue {
                entity,
                source: S::SOURCE,
                state: entered.name(),
            });
        }
        let name = machine.current().name();
        if label.0 != name {
            label.0 = name;
        }
        machine.tick();
    }
}
