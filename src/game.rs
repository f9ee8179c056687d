//! Scene director.
//!
//! [`Game`] keeps the registered levels and the running [`Scene`]. At every
//! tick boundary it looks at what the scene posted during the previous tick:
//! scene `Transition` requests replace the scene wholesale, menu and cutscene
//! requests are handed back to the host in a [`TickReport`].

use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::events::input::InputEvent;
use crate::events::messages::{CutsceneMessage, MenuMessage, SceneMessage};
use crate::level::{LevelData, LevelError};
use crate::resources::gameconfig::GameConfig;
use crate::scene::Scene;

/// Scene transitions followed within one tick boundary. Levels whose
/// `on_load` chains transitions longer than this stop at the last one.
const MAX_TRANSITIONS_PER_TICK: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("No level registered under '{0}'")]
    UnknownScene(String),

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// What happened at a tick boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Menu requests, for the host menu layer.
    pub menu: Vec<MenuMessage>,
    /// Cutscene requests, for the host cutscene player.
    pub cutscene: Vec<CutsceneMessage>,
    /// Name of the scene loaded at this boundary, if any.
    pub loaded: Option<String>,
}

pub struct Game {
    config: GameConfig,
    levels: FxHashMap<String, LevelData>,
    scene: Option<Scene>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            levels: FxHashMap::default(),
            scene: None,
        }
    }

    /// Register a level under its name, replacing any previous one.
    pub fn register(&mut self, level: LevelData) {
        self.levels.insert(level.name.clone(), level);
    }

    /// Read a level file and register it. Returns the level name.
    pub fn register_file(&mut self, path: &str) -> Result<String, GameError> {
        let level = LevelData::load_from_file(path)?;
        let name = level.name.clone();
        self.register(level);
        Ok(name)
    }

    pub fn has_level(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    /// Replace the running scene with a fresh one built from `name`.
    pub fn start(&mut self, name: &str) -> Result<(), GameError> {
        let level = self
            .levels
            .get(name)
            .ok_or_else(|| GameError::UnknownScene(name.to_string()))?;
        // The old world is dropped as a whole here.
        self.scene = Some(Scene::from_level(level, self.config.clone()));
        info!("scene '{}' started", name);
        Ok(())
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if let Some(scene) = self.scene.as_mut() {
            scene.handle_event(event);
        }
    }

    /// Resolve pending requests, then advance the running scene one tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for _ in 0..MAX_TRANSITIONS_PER_TICK {
            let Some(scene) = self.scene.as_ref() else {
                return report;
            };
            report.menu.extend(scene.menu_messages().iter().cloned());
            report.cutscene.extend(scene.cutscene_messages().iter().cloned());

            let target = scene.scene_messages().iter().rev().find_map(|message| match message {
                SceneMessage::Transition { target } => Some(target.clone()),
                _ => None,
            });
            let Some(target) = target else {
                break;
            };
            if let Err(err) = self.start(&target) {
                warn!("ignoring transition from '{}': {}", scene_name(&self.scene), err);
                break;
            }
            report.loaded = Some(target);
        }

        if let Some(scene) = self.scene.as_mut() {
            scene.update();
        }
        report
    }
}

fn scene_name(scene: &Option<Scene>) -> &str {
    scene.as_ref().map(Scene::name).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::messages::{ScopedMessage, SceneTransition};

    fn level(name: &str, on_load: Vec<ScopedMessage>) -> LevelData {
        LevelData {
            name: name.into(),
            background: String::new(),
            bounds: None,
            solids: Vec::new(),
            entities: Vec::new(),
            dialogue: Vec::new(),
            animations: Default::default(),
            on_load,
            next: None,
        }
    }

    fn transition(target: &str) -> SceneMessage {
        SceneMessage::Transition {
            target: target.into(),
        }
    }

    #[test]
    fn test_start_unknown_scene_fails() {
        let mut game = Game::new(GameConfig::new());
        assert!(matches!(game.start("nowhere"), Err(GameError::UnknownScene(_))));
        assert!(game.scene().is_none());
    }

    #[test]
    fn test_transition_replaces_scene_at_next_boundary() {
        let mut game = Game::new(GameConfig::new());
        game.register(level("a", Vec::new()));
        game.register(level("b", Vec::new()));
        game.start("a").unwrap();

        game.tick();
        game.scene_mut().unwrap().post(transition("b"));
        let report = game.tick();
        assert_eq!(report.loaded.as_deref(), Some("b"));
        assert_eq!(game.scene().unwrap().name(), "b");
        assert_eq!(game.scene().unwrap().ticks(), 1);
    }

    #[test]
    fn test_unknown_transition_keeps_scene() {
        let mut game = Game::new(GameConfig::new());
        game.register(level("a", Vec::new()));
        game.start("a").unwrap();
        game.scene_mut().unwrap().post(transition("missing"));
        let report = game.tick();
        assert!(report.loaded.is_none());
        assert_eq!(game.scene().unwrap().name(), "a");
    }

    #[test]
    fn test_on_load_requests_surface_once() {
        let mut game = Game::new(GameConfig::new());
        game.register(level(
            "intro",
            vec![
                ScopedMessage::Cutscene(CutsceneMessage::Transition {
                    target: "pig".into(),
                }),
                ScopedMessage::Scene(SceneTransition::Transition {
                    target: "forest".into(),
                }),
            ],
        ));
        game.register(level(
            "forest",
            vec![ScopedMessage::Menu(MenuMessage::Transition {
                target: "hud".into(),
            })],
        ));
        game.start("intro").unwrap();

        let report = game.tick();
        assert_eq!(report.loaded.as_deref(), Some("forest"));
        assert_eq!(report.cutscene.len(), 1);
        assert_eq!(report.menu.len(), 1);

        let report = game.tick();
        assert_eq!(report, TickReport::default());
    }
}
