use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::outofbounds::OutOfBounds;
use crate::components::rigidbody::RigidBody;
use crate::events::messages::SceneMessage;
use crate::resources::channel::MessageChannel;
use crate::resources::levelinfo::LevelInfo;

/// Report bodies that left the level bounds.
///
/// `BodyOutOfBounds` is posted once per exit; the [`OutOfBounds`] marker
/// stays on the body until it overlaps the bounds again. Nothing else is
/// done to the body.
pub fn track_out_of_bounds(
    query: Query<(Entity, &MapPosition, &BoxCollider, Has<OutOfBounds>), With<RigidBody>>,
    level: Res<LevelInfo>,
    mut channel: ResMut<MessageChannel<SceneMessage>>,
    mut commands: Commands,
) {
    for (entity, position, collider, flagged) in query.iter() {
        let inside = collider.rect(position.pos).intersects(&level.bounds);
        match (inside, flagged) {
            (false, false) => {
                commands.entity(entity).insert(OutOfBounds);
                channel.post(SceneMessage::BodyOutOfBounds { entity });
            }
            (true, true) => {
                commands.entity(entity).remove::<OutOfBounds>();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_exit_is_reported_once() {
        let mut world = World::new();
        world.insert_resource(LevelInfo {
            name: "test".into(),
            background: String::new(),
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            next: None,
        });
        world.insert_resource(MessageChannel::<SceneMessage>::new());
        let body = world
            .spawn((MapPosition::new(50.0, 150.0), BoxCollider::new(10.0, 10.0), RigidBody::new()))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(track_out_of_bounds);

        schedule.run(&mut world);
        assert!(world.get::<OutOfBounds>(body).is_some());
        assert_eq!(
            world.resource::<MessageChannel<SceneMessage>>().posted(),
            &[SceneMessage::BodyOutOfBounds { entity: body }]
        );

        world.resource_mut::<MessageChannel<SceneMessage>>().deliver();
        schedule.run(&mut world);
        assert!(world.resource::<MessageChannel<SceneMessage>>().posted().is_empty());

        world.get_mut::<MapPosition>(body).unwrap().pos.y = 50.0;
        schedule.run(&mut world);
        assert!(world.get::<OutOfBounds>(body).is_none());
    }
}
