//! Boss brain.
//!
//! Each tick the boss picks the nearest living player as its target and
//! acts on the distance to it:
//!
//! | state  | behaviour                                                        |
//! |--------|------------------------------------------------------------------|
//! | idle   | stands still; chases once a target is within sight range         |
//! | chase  | walks toward the target; attacks in range when cooled down       |
//! | attack | winds up, strikes the reach box once, then cools down            |
//! | hurt   | stunned for a while after a hit                                  |
//! | dead   | frozen, no longer a solid                                        |

use bevy_ecs::prelude::*;
use log::info;
use smallvec::SmallVec;

use crate::components::boss::{Boss, BossState};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerState};
use crate::components::rigidbody::RigidBody;
use crate::components::solid::Solid;
use crate::components::statemachine::StateMachine;
use crate::events::messages::SceneMessage;
use crate::geometry::Rect;
use crate::resources::channel::MessageChannel;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rng::SceneRng;

pub fn boss_brain(
    mut bosses: Query<
        (
            Entity,
            &mut Boss,
            &mut StateMachine<BossState>,
            &mut RigidBody,
            &mut Solid,
            &MapPosition,
            &BoxCollider,
        ),
        Without<Player>,
    >,
    players: Query<(Entity, &MapPosition, &BoxCollider, &StateMachine<PlayerState>), With<Player>>,
    config: Res<GameConfig>,
    mut rng: ResMut<SceneRng>,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
) {
    let settings = &config.boss;
    let struck: SmallVec<[Entity; 2]> = channel
        .iter()
        .filter_map(|message| match message {
            SceneMessage::BossStruck { boss, .. } => Some(*boss),
            _ => None,
        })
        .collect();

    for (entity, mut boss, mut machine, mut rigidbody, mut solid, position, collider) in bosses.iter_mut() {
        if machine.is(BossState::Dead) {
            continue;
        }

        if struck.contains(&entity) && !machine.is(BossState::Hurt) {
            boss.health = boss.health.saturating_sub(1);
            rigidbody.velocity.x = 0.0;
            if boss.health == 0 {
                machine.transition_to(BossState::Dead);
                rigidbody.freeze();
                solid.enabled = false;
                info!("boss {:?} defeated", entity);
                channel.post(SceneMessage::BossDefeated { boss: entity });
            } else {
                machine.transition_to(BossState::Hurt);
            }
            continue;
        }

        boss.cooldown = boss.cooldown.saturating_sub(1);
        let body = collider.rect(position.pos);
        let center = body.center();
        let target: Option<(Entity, Rect)> = players
            .iter()
            .filter(|(.., state)| !state.is(PlayerState::Dead))
            .map(|(player, pos, player_collider, _)| (player, player_collider.rect(pos.pos)))
            .min_by(|a, b| {
                let da = (a.1.center() - center).length();
                let db = (b.1.center() - center).length();
                da.total_cmp(&db)
            });
        boss.target = target.map(|(player, _)| player);

        match machine.current() {
            BossState::Hurt => {
                rigidbody.velocity.x = 0.0;
                if machine.ticks_in_state() >= settings.hurt_ticks {
                    machine.transition_to(BossState::Idle);
                }
            }
            BossState::Attack => {
                rigidbody.velocity.x = 0.0;
                let elapsed = machine.ticks_in_state();
                if elapsed >= settings.windup_ticks && !boss.struck {
                    boss.struck = true;
                    let reach = boss.facing.reach_box(&body, settings.attack_reach);
                    if let Some((player, player_rect)) = target {
                        if reach.intersects(&player_rect) || body.intersects(&player_rect) {
                            channel.post(SceneMessage::PlayerHit {
                                player,
                                source: entity,
                            });
                        }
                    }
                }
                if elapsed >= settings.windup_ticks.saturating_add(settings.attack_ticks) {
                    boss.cooldown = settings.cooldown_ticks + rng.jitter(settings.cooldown_jitter);
                    machine.transition_to(BossState::Idle);
                }
            }
            BossState::Idle | BossState::Chase => {
                let Some((_, player_rect)) = target else {
                    rigidbody.velocity.x = 0.0;
                    machine.transition_to(BossState::Idle);
                    continue;
                };
                let target_center = player_rect.center();
                let distance = (target_center - center).length();
                boss.facing = boss.facing.toward(center.x, target_center.x);

                if distance <= settings.attack_range {
                    rigidbody.velocity.x = 0.0;
                    if boss.cooldown == 0 && machine.transition_to(BossState::Attack) {
                        boss.struck = false;
                    }
                } else if distance <= settings.sight_range {
                    rigidbody.velocity.x = settings.chase_speed * boss.facing.sign();
                    machine.transition_to(BossState::Chase);
                } else {
                    rigidbody.velocity.x = 0.0;
                    machine.transition_to(BossState::Idle);
                }
            }
            BossState::Dead => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector2;

    fn setup(player_x: f32) -> (World, Entity, Entity, Schedule) {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(SceneRng::seeded(3));
        world.insert_resource(MessageChannel::<SceneMessage>::new());
        let boss = world
            .spawn((
                Boss::new(2),
                StateMachine::new(BossState::Idle),
                RigidBody::new(),
                Solid::new(),
                MapPosition::new(0.0, 0.0),
                BoxCollider::new(64.0, 64.0),
            ))
            .id();
        let player = world
            .spawn((
                Player::new(Vector2::zero(), 3),
                StateMachine::new(PlayerState::Idle),
                MapPosition::new(player_x, 16.0),
                BoxCollider::new(28.0, 48.0),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(boss_brain);
        (world, boss, player, schedule)
    }

    #[test]
    fn test_chases_visible_target() {
        let (mut world, boss, player, mut schedule) = setup(250.0);
        schedule.run(&mut world);
        assert!(world.get::<StateMachine<BossState>>(boss).unwrap().is(BossState::Chase));
        assert_eq!(world.get::<RigidBody>(boss).unwrap().velocity.x, 2.0);
        assert_eq!(world.get::<Boss>(boss).unwrap().target, Some(player));
    }

    #[test]
    fn test_ignores_target_out_of_sight() {
        let (mut world, boss, _, mut schedule) = setup(2000.0);
        schedule.run(&mut world);
        assert!(world.get::<StateMachine<BossState>>(boss).unwrap().is(BossState::Idle));
        assert_eq!(world.get::<RigidBody>(boss).unwrap().velocity.x, 0.0);
    }

    #[test]
    fn test_attack_strikes_once_after_windup() {
        let (mut world, boss, player, mut schedule) = setup(70.0);
        schedule.run(&mut world);
        assert!(world.get::<StateMachine<BossState>>(boss).unwrap().is(BossState::Attack));

        let windup = world.resource::<GameConfig>().boss.windup_ticks;
        let mut hits = 0;
        for _ in 0..windup + 5 {
            world.get_mut::<StateMachine<BossState>>(boss).unwrap().tick();
            world.resource_mut::<MessageChannel<SceneMessage>>().deliver();
            schedule.run(&mut world);
            hits += world
                .resource::<MessageChannel<SceneMessage>>()
                .posted()
                .iter()
                .filter(|m| **m == SceneMessage::PlayerHit { player, source: boss })
                .count();
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_last_strike_kills_and_stops_blocking() {
        let (mut world, boss, player, mut schedule) = setup(2000.0);
        world.get_mut::<Boss>(boss).unwrap().health = 1;
        {
            let mut channel = world.resource_mut::<MessageChannel<SceneMessage>>();
            channel.post(SceneMessage::BossStruck { boss, player });
            channel.deliver();
        }
        schedule.run(&mut world);
        assert!(world.get::<StateMachine<BossState>>(boss).unwrap().is(BossState::Dead));
        assert!(!world.get::<Solid>(boss).unwrap().enabled);
        assert!(world.get::<RigidBody>(boss).unwrap().frozen);
    }
}
