//! Player systems.
//!
//! - [`player_reactions`] applies the hits delivered this tick.
//! - [`player_control`] turns input into velocity, jumps and attacks, and
//!   handles the hurt timer and respawn.
//! - [`player_motion_state`] runs after bodies moved and derives the
//!   movement state (idle, walking, jumping, falling, landing) from the
//!   collision outcome.

use bevy_ecs::prelude::*;
use log::info;
use smallvec::SmallVec;

use crate::components::boss::{Boss, BossState};
use crate::components::boxcollider::BoxCollider;
use crate::components::contacts::Contacts;
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::components::rigidbody::RigidBody;
use crate::components::statemachine::StateMachine;
use crate::events::messages::SceneMessage;
use crate::geometry::Vector2;
use crate::resources::channel::MessageChannel;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

/// Lose a life for each player hit this tick, at most one per tick.
///
/// Hits on a hurt or dead player are ignored. A player out of lives dies
/// and `PlayerDefeated` is posted.
pub fn player_reactions(
    mut players: Query<(Entity, &mut Player, &mut StateMachine<PlayerState>, &mut RigidBody)>,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
) {
    let hits: SmallVec<[Entity; 4]> = channel
        .iter()
        .filter_map(|message| match message {
            SceneMessage::PlayerHit { player, .. } => Some(*player),
            _ => None,
        })
        .collect();
    if hits.is_empty() {
        return;
    }

    for (entity, mut player, mut machine, mut rigidbody) in players.iter_mut() {
        if !hits.contains(&entity) || machine.current().is_invulnerable() {
            continue;
        }
        player.lives = player.lives.saturating_sub(1);
        rigidbody.freeze();
        if player.lives == 0 {
            machine.transition_to(PlayerState::Dead);
            info!("player {:?} defeated", entity);
            channel.post(SceneMessage::PlayerDefeated { player: entity });
        } else {
            machine.transition_to(PlayerState::Hurt);
        }
    }
}

/// Turn the input state into player motion.
pub fn player_control(
    mut players: Query<
        (
            Entity,
            &mut Player,
            &InputControlled,
            &mut StateMachine<PlayerState>,
            &mut RigidBody,
            &mut MapPosition,
            &BoxCollider,
            &mut Contacts,
        ),
        Without<Boss>,
    >,
    bosses: Query<(Entity, &MapPosition, &BoxCollider, &StateMachine<BossState>), (With<Boss>, Without<Player>)>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
) {
    for (entity, mut player, control, mut machine, mut rigidbody, mut position, collider, mut contacts) in
        players.iter_mut()
    {
        match machine.current() {
            PlayerState::Dead => continue,
            PlayerState::Hurt => {
                if machine.ticks_in_state() >= config.player.hurt_ticks {
                    position.pos = player.spawn;
                    rigidbody.velocity = Vector2::zero();
                    rigidbody.unfreeze();
                    *contacts = Contacts::default();
                    machine.transition_to(PlayerState::Idle);
                }
                continue;
            }
            PlayerState::Attacking => {
                if contacts.on_ground {
                    rigidbody.velocity.x = 0.0;
                }
                if machine.ticks_in_state() >= config.player.attack_ticks {
                    let next = if contacts.on_ground {
                        PlayerState::Idle
                    } else {
                        PlayerState::Falling
                    };
                    machine.transition_to(next);
                }
                continue;
            }
            _ => {}
        }

        let direction = input.horizontal();
        rigidbody.velocity.x = direction * control.run_speed;
        if direction != 0.0 {
            player.facing = player.facing.toward(0.0, direction);
        }

        if input.jump.just_pressed && contacts.on_ground {
            rigidbody.velocity.y = -control.jump_speed;
            machine.transition_to(PlayerState::Jumping);
        }

        if input.attack.just_pressed && machine.transition_to(PlayerState::Attacking) {
            let reach = player
                .facing
                .reach_box(&collider.rect(position.pos), config.player.attack_reach);
            for (boss, boss_pos, boss_collider, boss_state) in bosses.iter() {
                if boss_state.is(BossState::Dead) {
                    continue;
                }
                if reach.intersects(&boss_collider.rect(boss_pos.pos)) {
                    channel.post(SceneMessage::BossStruck {
                        boss,
                        player: entity,
                    });
                }
            }
        }
    }
}

/// Derive the movement state of mobile players from their contacts.
pub fn player_motion_state(
    mut players: Query<(&mut StateMachine<PlayerState>, &RigidBody, &Contacts), With<Player>>,
    config: Res<GameConfig>,
) {
    for (mut machine, rigidbody, contacts) in players.iter_mut() {
        let state = machine.current();
        if !state.is_mobile() {
            continue;
        }
        let next = if contacts.on_ground {
            if matches!(state, PlayerState::Jumping | PlayerState::Falling) {
                PlayerState::Landing
            } else if state == PlayerState::Landing
                && machine.ticks_in_state() < config.player.landing_ticks
            {
                PlayerState::Landing
            } else if rigidbody.velocity.x != 0.0 {
                PlayerState::Walking
            } else {
                PlayerState::Idle
            }
        } else if rigidbody.velocity.y < 0.0 {
            PlayerState::Jumping
        } else {
            PlayerState::Falling
        };
        machine.transition_to(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::input::{InputAction, InputEvent};

    fn setup() -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(InputState::default());
        world.insert_resource(MessageChannel::<SceneMessage>::new());
        let player = world
            .spawn((
                Player::new(Vector2::new(5.0, 5.0), 2),
                InputControlled::new(4.0, 14.0),
                StateMachine::new(PlayerState::Idle),
                RigidBody::new(),
                MapPosition::new(50.0, 50.0),
                BoxCollider::new(10.0, 20.0),
                Contacts {
                    on_ground: true,
                    ..Default::default()
                },
            ))
            .id();
        (world, player)
    }

    #[test]
    fn test_jump_requires_ground() {
        let (mut world, player) = setup();
        world
            .resource_mut::<InputState>()
            .apply(InputEvent::press(InputAction::Jump));
        let mut schedule = Schedule::default();
        schedule.add_systems(player_control);
        schedule.run(&mut world);
        assert_eq!(world.get::<RigidBody>(player).unwrap().velocity.y, -14.0);
        assert!(world
            .get::<StateMachine<PlayerState>>(player)
            .unwrap()
            .is(PlayerState::Jumping));

        world.get_mut::<RigidBody>(player).unwrap().velocity.y = 0.0;
        world.get_mut::<Contacts>(player).unwrap().on_ground = false;
        schedule.run(&mut world);
        assert_eq!(world.get::<RigidBody>(player).unwrap().velocity.y, 0.0);
    }

    #[test]
    fn test_hits_cost_one_life_per_tick() {
        let (mut world, player) = setup();
        let spike = world.spawn_empty().id();
        {
            let mut channel = world.resource_mut::<MessageChannel<SceneMessage>>();
            channel.post(SceneMessage::PlayerHit {
                player,
                source: spike,
            });
            channel.post(SceneMessage::PlayerHit {
                player,
                source: spike,
            });
            channel.deliver();
        }
        let mut schedule = Schedule::default();
        schedule.add_systems(player_reactions);
        schedule.run(&mut world);

        assert_eq!(world.get::<Player>(player).unwrap().lives, 1);
        assert!(world
            .get::<StateMachine<PlayerState>>(player)
            .unwrap()
            .is(PlayerState::Hurt));
        assert!(world.get::<RigidBody>(player).unwrap().frozen);
    }

    #[test]
    fn test_last_life_posts_defeat() {
        let (mut world, player) = setup();
        world.get_mut::<Player>(player).unwrap().lives = 1;
        let spike = world.spawn_empty().id();
        {
            let mut channel = world.resource_mut::<MessageChannel<SceneMessage>>();
            channel.post(SceneMessage::PlayerHit {
                player,
                source: spike,
            });
            channel.deliver();
        }
        let mut schedule = Schedule::default();
        schedule.add_systems(player_reactions);
        schedule.run(&mut world);

        assert!(world
            .get::<StateMachine<PlayerState>>(player)
            .unwrap()
            .is(PlayerState::Dead));
        let channel = world.resource::<MessageChannel<SceneMessage>>();
        assert_eq!(channel.posted(), &[SceneMessage::PlayerDefeated { player }]);
    }

    #[test]
    fn test_motion_state_follows_contacts() {
        let (mut world, player) = setup();
        let mut schedule = Schedule::default();
        schedule.add_systems(player_motion_state);

        world.get_mut::<Contacts>(player).unwrap().on_ground = false;
        world.get_mut::<RigidBody>(player).unwrap().velocity.y = 3.0;
        schedule.run(&mut world);
        assert!(world
            .get::<StateMachine<PlayerState>>(player)
            .unwrap()
            .is(PlayerState::Falling));

        world.get_mut::<Contacts>(player).unwrap().on_ground = true;
        schedule.run(&mut world);
        assert!(world
            .get::<StateMachine<PlayerState>>(player)
            .unwrap()
            .is(PlayerState::Landing));
    }
}
