//! Draw pass.
//!
//! [`render_pass`] walks every drawable entity and produces a [`Frame`]: one
//! [`DrawItem`] per shape part, sorted by layer and then spawn order, with
//! both world and camera-relative positions. Blitting is left to the host.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::animation::Animation;
use crate::components::kind::Kind;
use crate::components::mapposition::MapPosition;
use crate::components::shape::Shape;
use crate::components::sprite::Sprite;
use crate::components::statemachine::StateLabel;
use crate::components::zindex::{SpawnIndex, ZIndex};
use crate::geometry::{Rect, Vector2};
use crate::resources::camera::Camera;
use crate::resources::dialogue::{Dialogue, DialogueLine};
use crate::resources::levelinfo::LevelInfo;
use crate::resources::worldtime::WorldTime;

/// Asset key and frame number to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameHandle {
    pub key: String,
    pub frame: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    #[serde(skip)]
    pub entity: Entity,
    pub kind: Kind,
    pub state: &'static str,
    pub handle: FrameHandle,
    pub world: Vector2,
    pub screen: Vector2,
    pub size: Vector2,
    pub layer: i32,
    pub flip_h: bool,
    /// Whether the item intersects the camera view.
    pub on_screen: bool,
}

/// Everything the renderer needs for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub background: String,
    pub camera: Vector2,
    pub items: Vec<DrawItem>,
    pub dialogue: Option<DialogueLine>,
}

/// Build the [`Frame`] for the current world state.
pub fn render_pass(world: &mut World) -> Frame {
    let camera = *world.resource::<Camera>();
    let view = Rect::at(camera.offset, camera.viewport);

    let mut keyed: Vec<((i32, u32, usize), DrawItem)> = Vec::new();
    {
        let mut q = world.query::<(
            Entity,
            &Kind,
            &MapPosition,
            &Sprite,
            &ZIndex,
            &SpawnIndex,
            &Shape,
            Option<&Animation>,
            Option<&StateLabel>,
        )>();
        for (entity, kind, position, sprite, z, spawn, shape, animation, label) in q.iter(world) {
            for (index, part) in shape.parts.iter().enumerate() {
                let handle = match animation {
                    Some(anim) => FrameHandle {
                        key: anim.animation_key.clone(),
                        frame: anim.frame_index,
                    },
                    None => FrameHandle {
                        key: sprite
                            .assets
                            .get(shape.asset_index(index, sprite.assets.len()))
                            .cloned()
                            .unwrap_or_default(),
                        frame: 0,
                    },
                };
                let rect = part.translated(position.pos);
                let item = DrawItem {
                    entity,
                    kind: *kind,
                    state: label.map(|l| l.0).unwrap_or(""),
                    handle,
                    world: rect.origin(),
                    screen: camera.to_screen(rect.origin()),
                    size: rect.size(),
                    layer: z.0,
                    flip_h: sprite.flip_h,
                    on_screen: rect.intersects(&view),
                };
                keyed.push(((z.0, spawn.0, index), item));
            }
        }
    }
    keyed.sort_by_key(|(key, _)| *key);

    let level = world.resource::<LevelInfo>();
    Frame {
        tick: world.resource::<WorldTime>().ticks,
        background: level.background.clone(),
        camera: camera.offset,
        items: keyed.into_iter().map(|(_, item)| item).collect(),
        dialogue: world.resource::<Dialogue>().active_line().cloned(),
    }
}
