//! A running level.
//!
//! [`Scene`] owns the ECS [`World`] holding every entity of one level and the
//! tick [`Schedule`]. The host feeds input events with
//! [`handle_event`](Scene::handle_event), advances the simulation with
//! [`update`](Scene::update) and asks for a [`Frame`] with
//! [`draw`](Scene::draw). A scene is never torn down piecemeal: replacing it
//! drops the whole world.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use log::info;

use crate::components::kind::Kind;
use crate::components::zindex::SpawnIndex;
use crate::events::audio::AudioCue;
use crate::events::input::InputEvent;
use crate::events::messages::{CutsceneMessage, MenuMessage, SceneMessage, ScopedMessage};
use crate::level::{LevelData, spawn_level};
use crate::resources::audio::{AudioCueLog, setup_audio, shutdown_audio};
use crate::resources::camera::Camera;
use crate::resources::channel::MessageChannel;
use crate::resources::dialogue::Dialogue;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputQueue, InputState};
use crate::resources::levelinfo::LevelInfo;
use crate::resources::rng::SceneRng;
use crate::resources::solids::SolidSnapshot;
use crate::resources::worldtime::WorldTime;
use crate::systems::build_schedule;
use crate::systems::render::{Frame, render_pass};

pub struct Scene {
    world: World,
    schedule: Schedule,
}

impl Scene {
    /// Build the world for `level`: resources first, then its entities.
    pub fn from_level(level: &LevelData, config: GameConfig) -> Self {
        let mut world = World::new();
        let store = level.animation_store();

        let mut menu = MessageChannel::<MenuMessage>::new();
        let mut scene = MessageChannel::<SceneMessage>::new();
        let mut cutscene = MessageChannel::<CutsceneMessage>::new();
        for message in &level.on_load {
            match message.clone() {
                ScopedMessage::Menu(m) => menu.post(m),
                ScopedMessage::Scene(m) => scene.post(m.into()),
                ScopedMessage::Cutscene(m) => cutscene.post(m),
            }
        }
        world.insert_resource(menu);
        world.insert_resource(scene);
        world.insert_resource(cutscene);
        world.init_resource::<Messages<AudioCue>>();
        world.init_resource::<AudioCueLog>();

        world.insert_resource(LevelInfo {
            name: level.name.clone(),
            background: level.background.clone(),
            bounds: level.resolve_bounds(&config),
            next: level.next.clone(),
        });
        world.insert_resource(Camera::new(config.camera.x, config.camera.y));
        world.insert_resource(Dialogue::new(level.dialogue.clone(), config.caption_ticks));
        world.insert_resource(SceneRng::seeded(config.level.seed));
        world.init_resource::<SolidSnapshot>();
        world.init_resource::<InputState>();
        world.init_resource::<InputQueue>();
        world.init_resource::<WorldTime>();

        let spawned = spawn_level(&mut world, level, &config, &store);
        world.insert_resource(store);
        world.insert_resource(config);
        info!("scene '{}' loaded with {} entities", level.name, spawned);

        Self {
            world,
            schedule: build_schedule(),
        }
    }

    /// Queue an input event for the next tick. Order is preserved.
    pub fn handle_event(&mut self, event: InputEvent) {
        self.world.resource_mut::<InputQueue>().push(event);
    }

    /// Advance the scene by one tick.
    pub fn update(&mut self) {
        self.schedule.run(&mut self.world);
    }

    pub fn draw(&mut self) -> Frame {
        render_pass(&mut self.world)
    }

    pub fn name(&self) -> &str {
        &self.world.resource::<LevelInfo>().name
    }

    pub fn next_scene(&self) -> Option<&str> {
        self.world.resource::<LevelInfo>().next.as_deref()
    }

    pub fn ticks(&self) -> u64 {
        self.world.resource::<WorldTime>().ticks
    }

    /// Scene messages posted during the last tick.
    pub fn scene_messages(&self) -> &[SceneMessage] {
        self.world.resource::<MessageChannel<SceneMessage>>().posted()
    }

    /// Menu requests posted during the last tick.
    pub fn menu_messages(&self) -> &[MenuMessage] {
        self.world.resource::<MessageChannel<MenuMessage>>().posted()
    }

    /// Cutscene requests posted during the last tick.
    pub fn cutscene_messages(&self) -> &[CutsceneMessage] {
        self.world.resource::<MessageChannel<CutsceneMessage>>().posted()
    }

    /// Post a scene message from outside; delivered at the next tick.
    pub fn post(&mut self, message: SceneMessage) {
        self.world.resource_mut::<MessageChannel<SceneMessage>>().post(message);
    }

    /// State transition cues of the last tick.
    pub fn audio_cues(&self) -> &[AudioCue] {
        &self.world.resource::<AudioCueLog>().cues
    }

    /// Start forwarding audio cues to a playback thread.
    pub fn attach_audio(&mut self) -> Receiver<AudioCue> {
        setup_audio(&mut self.world)
    }

    pub fn detach_audio(&mut self) {
        shutdown_audio(&mut self.world);
    }

    /// Entities spawned from level data of `kind`, in spawn order.
    pub fn entities_of(&mut self, kind: Kind) -> Vec<Entity> {
        let mut query = self.world.query::<(Entity, &Kind, &SpawnIndex)>();
        let mut found: Vec<(u32, Entity)> = query
            .iter(&self.world)
            .filter(|(_, k, _)| **k == kind)
            .map(|(entity, _, index)| (index.0, entity))
            .collect();
        found.sort_unstable_by_key(|(index, _)| *index);
        found.into_iter().map(|(_, entity)| entity).collect()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::messages::SceneTransition;

    fn level(on_load: Vec<ScopedMessage>) -> LevelData {
        LevelData {
            name: "unit".into(),
            background: "bg".into(),
            bounds: None,
            solids: Vec::new(),
            entities: Vec::new(),
            dialogue: Vec::new(),
            animations: Default::default(),
            on_load,
            next: Some("unit_2".into()),
        }
    }

    #[test]
    fn test_on_load_messages_are_routed_by_scope() {
        let scene = Scene::from_level(
            &level(vec![
                ScopedMessage::Cutscene(CutsceneMessage::Transition {
                    target: "intro".into(),
                }),
                ScopedMessage::Scene(SceneTransition::Transition {
                    target: "unit_2".into(),
                }),
            ]),
            GameConfig::new(),
        );
        assert_eq!(
            scene.cutscene_messages(),
            &[CutsceneMessage::Transition {
                target: "intro".into()
            }]
        );
        assert_eq!(
            scene.scene_messages(),
            &[SceneMessage::Transition {
                target: "unit_2".into()
            }]
        );
        assert!(scene.menu_messages().is_empty());
    }

    #[test]
    fn test_update_advances_clock() {
        let mut scene = Scene::from_level(&level(Vec::new()), GameConfig::new());
        scene.update();
        scene.update();
        assert_eq!(scene.ticks(), 2);
        assert_eq!(scene.draw().tick, 2);
        assert_eq!(scene.next_scene(), Some("unit_2"));
    }
}
