use bevy_ecs::prelude::*;

use crate::resources::input::{InputQueue, InputState};

/// Fold the queued input events, in order, into [`InputState`].
pub fn apply_input(mut queue: ResMut<InputQueue>, mut input: ResMut<InputState>) {
    input.begin_tick();
    for event in queue.events.drain(..) {
        input.apply(event);
    }
}
