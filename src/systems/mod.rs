//! Simulation systems.
//!
//! This module groups all ECS systems that advance one scene tick, and the
//! schedule that orders them.
//!
//! Submodules overview
//! - [`animation`] – advance animation clocks and pick tracks from state
//! - [`boss`] – target selection, chase and attack for bosses
//! - [`bounds`] – flag bodies that left the level bounds
//! - [`collision`] – axis-separated resolution of bodies against solids
//! - [`door`] – doors waiting on switch ids
//! - [`hazard`] – spikes and spears hitting players
//! - [`input`] – fold queued input events into [`crate::resources::input::InputState`]
//! - [`messages`] – swap message inboxes at the start of a tick
//! - [`physics`] – gravity, speed clamp and integration
//! - [`platform`] – moving and disappearing platforms, solid snapshot
//! - [`player`] – hits, control and movement state of players
//! - [`presentation`] – camera, dialogue, audio forwarding and the clock
//! - [`render`] – build the draw list for a tick
//! - [`solids`] – keep static solid rectangles in world space
//! - [`statemachine`] – publish state transitions as audio cues and labels
//! - [`switch`] – switches turned on by a player

pub mod animation;
pub mod boss;
pub mod bounds;
pub mod collision;
pub mod door;
pub mod hazard;
pub mod input;
pub mod messages;
pub mod physics;
pub mod platform;
pub mod player;
pub mod presentation;
pub mod render;
pub mod solids;
pub mod statemachine;
pub mod switch;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::components::boss::BossState;
use crate::components::decoration::DecorationState;
use crate::components::door::DoorState;
use crate::components::hazard::{SpearState, SpikeState};
use crate::components::platform::{DisappearingState, PlatformState};
use crate::components::player::PlayerState;
use crate::components::switch::SwitchState;

/// Stages of a scene tick, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Deliver,
    Input,
    Decorations,
    Walls,
    Switches,
    Doors,
    Hazards,
    Platforms,
    Actors,
    Observe,
    Presentation,
}

/// Build the schedule that advances a scene by one tick.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.configure_sets(
        (
            TickSet::Deliver,
            TickSet::Input,
            TickSet::Decorations,
            TickSet::Walls,
            TickSet::Switches,
            TickSet::Doors,
            TickSet::Hazards,
            TickSet::Platforms,
            TickSet::Actors,
            TickSet::Observe,
            TickSet::Presentation,
        )
            .chain(),
    );

    schedule.add_systems((messages::deliver_messages, messages::update_audio_cues).in_set(TickSet::Deliver));
    schedule.add_systems(input::apply_input.in_set(TickSet::Input));
    schedule.add_systems(animation::animation.in_set(TickSet::Decorations));
    schedule.add_systems(solids::refresh_solids.in_set(TickSet::Walls));
    schedule.add_systems(switch::activate_switches.in_set(TickSet::Switches));
    schedule.add_systems(door::update_doors.in_set(TickSet::Doors));
    schedule.add_systems((hazard::update_spikes, hazard::update_spears).chain().in_set(TickSet::Hazards));
    schedule.add_systems(
        (
            platform::move_platforms,
            platform::dissolve_platforms,
            platform::collect_solids,
        )
            .chain()
            .in_set(TickSet::Platforms),
    );
    schedule.add_systems(
        (
            player::player_reactions,
            player::player_control,
            boss::boss_brain,
            physics::free_fall,
            collision::move_bodies,
        )
            .chain()
            .in_set(TickSet::Actors),
    );
    schedule.add_systems(
        (player::player_motion_state, bounds::track_out_of_bounds)
            .chain()
            .in_set(TickSet::Observe),
    );
    schedule.add_systems(
        (
            (
                statemachine::sync_state::<PlayerState>,
                statemachine::sync_state::<BossState>,
                statemachine::sync_state::<SwitchState>,
                statemachine::sync_state::<DoorState>,
                statemachine::sync_state::<SpikeState>,
                statemachine::sync_state::<SpearState>,
                statemachine::sync_state::<PlatformState>,
                statemachine::sync_state::<DisappearingState>,
                statemachine::sync_state::<DecorationState>,
            )
                .chain(),
            animation::animation_controller,
            animation::face_sprites,
            presentation::follow_camera,
            presentation::update_dialogue,
            presentation::forward_audio_cues,
            presentation::advance_time,
        )
            .chain()
            .in_set(TickSet::Presentation),
    );
    schedule
}
