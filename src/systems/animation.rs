//! Animation systems.
//!
//! - [`animation`] advances every animation by one tick using the
//!   definitions in the [`AnimationStore`].
//! - [`animation_controller`] switches the active animation when the
//!   entity's [`StateLabel`] maps to another key, restarting it at frame 0.
//! - [`face_sprites`] mirrors actor facing into the sprite flip flag.
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Entities have an [`Animation`] component pointing to a key
//! 3. The `animation` system advances frames every `ticks_per_frame` ticks
//! 4. The `animation_controller` system picks the key for the current state

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, AnimationController};
use crate::components::boss::Boss;
use crate::components::player::{Facing, Player};
use crate::components::sprite::Sprite;
use crate::components::statemachine::StateLabel;
use crate::resources::animationstore::AnimationStore;

/// Advance animation playback by one tick.
///
/// Unknown keys stay on frame 0. Non-looping animations hold their last
/// frame.
pub fn animation(mut query: Query<&mut Animation>, animation_store: Res<AnimationStore>) {
    for mut anim_comp in query.iter_mut() {
        let Some(animation) = animation_store.get(&anim_comp.animation_key) else {
            continue;
        };
        if animation.frame_count == 0 {
            continue;
        }
        anim_comp.elapsed_ticks += 1;
        if anim_comp.elapsed_ticks < animation.ticks_per_frame.max(1) {
            continue;
        }
        anim_comp.elapsed_ticks = 0;
        anim_comp.frame_index += 1;
        if anim_comp.frame_index >= animation.frame_count {
            anim_comp.frame_index = if animation.looped {
                0
            } else {
                animation.frame_count - 1 // stay on last frame
            };
        }
    }
}

/// Select the animation for each entity's current state.
pub fn animation_controller(mut query: Query<(&StateLabel, &mut AnimationController, &mut Animation)>) {
    for (label, mut controller, mut animation) in query.iter_mut() {
        if controller.key_for(label.0) == controller.current_key {
            continue;
        }
        let key = controller.key_for(label.0).to_string();
        animation.restart_with(&key);
        controller.current_key = key;
    }
}

pub fn face_sprites(
    mut players: Query<(&Player, &mut Sprite), Without<Boss>>,
    mut bosses: Query<(&Boss, &mut Sprite), Without<Player>>,
) {
    for (player, mut sprite) in players.iter_mut() {
        sprite.flip_h = player.facing == Facing::Left;
    }
    for (boss, mut sprite) in bosses.iter_mut() {
        sprite.flip_h = boss.facing == Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::AnimationResource;

    fn store() -> AnimationStore {
        let mut store = AnimationStore::default();
        store.insert("hero_walking", AnimationResource::new(3, 2, true));
        store.insert("door_opening", AnimationResource::new(2, 1, false));
        store
    }

    #[test]
    fn test_frames_advance_and_loop() {
        let mut world = World::new();
        world.insert_resource(store());
        let e = world.spawn(Animation::new("hero_walking")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);

        let mut frames = Vec::new();
        for _ in 0..7 {
            schedule.run(&mut world);
            frames.push(world.get::<Animation>(e).unwrap().frame_index);
        }
        assert_eq!(frames, vec![0, 1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn test_non_looping_holds_last_frame() {
        let mut world = World::new();
        world.insert_resource(store());
        let e = world.spawn(Animation::new("door_opening")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        for _ in 0..5 {
            schedule.run(&mut world);
        }
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 1);
    }

    #[test]
    fn test_controller_restarts_on_state_change() {
        let mut world = World::new();
        let controller = AnimationController::new("hero").with_state("walking", "hero_walking");
        let mut anim = Animation::new("hero");
        anim.frame_index = 4;
        let e = world.spawn((StateLabel("walking"), controller, anim)).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation_controller);
        schedule.run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap(), &Animation::new("hero_walking"));

        world.get_mut::<StateLabel>(e).unwrap().0 = "idle";
        schedule.run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap().animation_key, "hero");
    }
}
