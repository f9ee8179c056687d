//! Level description and spawning.
//!
//! A level is a JSON document listing static solids and entities. Loading
//! only parses it; [`spawn_level`] turns the description into ECS entities
//! in a fresh [`World`].
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "name": "forest_01",
//!   "background": "forest_bg",
//!   "solids": [
//!     { "x": 0, "y": 320, "repeat": 20, "orientation": "h", "assets": ["grass"] }
//!   ],
//!   "entities": [
//!     { "kind": "player", "x": 40, "y": 200 },
//!     { "kind": "switch", "x": 300, "y": 304, "id": 1 },
//!     { "kind": "door", "x": 600, "y": 224, "id": 1, "switches_waiting": [1] },
//!     { "kind": "moving_platform", "x": 100, "y": 250, "end": [300, 250], "speed": [2, 0] }
//!   ],
//!   "dialogue": [{ "text": "Find the exit", "x": 20, "y": 20 }],
//!   "animations": { "player_walking": { "frame_count": 4 } },
//!   "on_load": [],
//!   "next": "forest_02"
//! }
//! ```
//!
//! Malformed content is handled by policy: entries with degenerate geometry
//! are skipped and doors waiting on switches that do not exist simply never
//! open. Both are reported as [`LevelWarning`]s.

use bevy_ecs::prelude::*;
use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::components::animation::{Animation, AnimationController};
use crate::components::boss::{Boss, BossState};
use crate::components::boxcollider::BoxCollider;
use crate::components::contacts::Contacts;
use crate::components::decoration::{Decoration, DecorationState};
use crate::components::door::{Door, DoorState};
use crate::components::hazard::{Spear, SpearState, Spike, SpikeState};
use crate::components::inputcontrolled::InputControlled;
use crate::components::kind::Kind;
use crate::components::mapposition::MapPosition;
use crate::components::platform::{DisappearingState, PlatformState};
use crate::components::player::{Player, PlayerState};
use crate::components::rigidbody::RigidBody;
use crate::components::shape::{Orientation, Shape};
use crate::components::solid::{Disappearing, Kinematic, Solid};
use crate::components::sprite::Sprite;
use crate::components::statemachine::{EntityState, StateLabel, StateMachine};
use crate::components::switch::{Switch, SwitchState};
use crate::components::zindex::{SpawnIndex, ZIndex};
use crate::events::messages::ScopedMessage;
use crate::geometry::{Rect, Vector2};
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::dialogue::DialogueLine;
use crate::resources::gameconfig::GameConfig;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("Failed to read level {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The level is not valid JSON for [`LevelData`].
    #[error("Failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Content problems that do not prevent the level from loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelWarning {
    #[error("door {door} waits on switch {switch}, which no switch provides")]
    DanglingSwitch { door: u32, switch: u32 },

    #[error("{what} #{index} has degenerate geometry and is skipped")]
    InvalidGeometry { what: &'static str, index: usize },

    #[error("level has no player")]
    NoPlayer,
}

/// Parsed level document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    #[serde(default)]
    pub background: String,
    /// Area bodies may occupy. Derived from the geometry when absent.
    #[serde(default)]
    pub bounds: Option<Rect>,
    #[serde(default)]
    pub solids: Vec<SolidDef>,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    #[serde(default)]
    pub animations: FxHashMap<String, AnimationResource>,
    /// Messages posted when the scene starts.
    #[serde(default)]
    pub on_load: Vec<ScopedMessage>,
    /// Scene that follows this one.
    #[serde(default)]
    pub next: Option<String>,
}

/// A run of wall tiles, optionally moving.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SolidDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub orientation: Orientation,
    /// Tile size; `[sizes] tile_*` from the config when absent.
    #[serde(default)]
    pub tile: Option<[f32; 2]>,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub layer: Option<i32>,
    /// Ping-pong motion; makes the solid a moving platform.
    #[serde(default)]
    pub motion: Option<MotionDef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MotionDef {
    pub end: [f32; 2],
    pub speed: [f32; 2],
}

/// One entity of the level. Fields that do not apply to `kind` are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EntityDef {
    pub kind: Kind,
    pub x: f32,
    pub y: f32,
    /// Switch or door identifier.
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub size: Option<[f32; 2]>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub layer: Option<i32>,
    #[serde(default, alias = "switchesWaiting")]
    pub switches_waiting: Vec<u32>,
    #[serde(default)]
    pub end: Option<[f32; 2]>,
    #[serde(default)]
    pub speed: Option<[f32; 2]>,
    #[serde(default)]
    pub extended_ticks: Option<u32>,
    #[serde(default)]
    pub retracted_ticks: Option<u32>,
    /// Spear phase offset in ticks.
    #[serde(default)]
    pub delay: u32,
    #[serde(default)]
    pub health: Option<u32>,
}

fn default_repeat() -> u32 {
    1
}

impl EntityDef {
    /// Entity of `kind` at `(x, y)` with every optional field unset.
    pub fn new(kind: Kind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            id: 0,
            size: None,
            repeat: 1,
            orientation: Orientation::Horizontal,
            assets: Vec::new(),
            layer: None,
            switches_waiting: Vec::new(),
            end: None,
            speed: None,
            extended_ticks: None,
            retracted_ticks: None,
            delay: 0,
            health: None,
        }
    }

    pub fn size(&self, config: &GameConfig) -> Vector2 {
        self.size
            .map(Vector2::from)
            .unwrap_or_else(|| config.sizes.for_kind(self.kind))
    }

    /// Shape in entity-local space. Bodies are always a single rectangle.
    pub fn shape(&self, config: &GameConfig) -> Shape {
        let size = self.size(config);
        match self.kind {
            Kind::Player | Kind::Boss => Shape::single(size.x, size.y),
            _ => Shape::tiled(size, self.repeat.max(1), self.orientation),
        }
    }

    fn footprint(&self, config: &GameConfig) -> Option<Rect> {
        footprint(&self.shape(config), Vector2::new(self.x, self.y))
    }
}

impl SolidDef {
    pub fn shape(&self, config: &GameConfig) -> Shape {
        let tile = self.tile.map(Vector2::from).unwrap_or(config.sizes.tile);
        Shape::tiled(tile, self.repeat.max(1), self.orientation)
    }

    fn footprint(&self, config: &GameConfig) -> Option<Rect> {
        footprint(&self.shape(config), Vector2::new(self.x, self.y))
    }
}

fn footprint(shape: &Shape, position: Vector2) -> Option<Rect> {
    shape
        .bounds()
        .map(|b| b.translated(position))
        .filter(|r| r.is_valid())
}

impl LevelData {
    /// Loads a level from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Content problems found in the level, in document order.
    pub fn warnings(&self, config: &GameConfig) -> Vec<LevelWarning> {
        let mut warnings = Vec::new();
        for (index, solid) in self.solids.iter().enumerate() {
            if solid.footprint(config).is_none() {
                warnings.push(LevelWarning::InvalidGeometry {
                    what: "solid",
                    index,
                });
            }
        }
        for (index, entity) in self.entities.iter().enumerate() {
            if entity.footprint(config).is_none() {
                warnings.push(LevelWarning::InvalidGeometry {
                    what: entity.kind.name(),
                    index,
                });
            }
        }

        let switches: FxHashSet<u32> = self
            .entities
            .iter()
            .filter(|e| e.kind == Kind::Switch)
            .map(|e| e.id)
            .collect();
        for door in self.entities.iter().filter(|e| e.kind == Kind::Door) {
            for &switch in &door.switches_waiting {
                if !switches.contains(&switch) {
                    warnings.push(LevelWarning::DanglingSwitch { door: door.id, switch });
                }
            }
        }

        if !self.entities.iter().any(|e| e.kind == Kind::Player) {
            warnings.push(LevelWarning::NoPlayer);
        }
        warnings
    }

    /// Animation definitions of the level as a store.
    pub fn animation_store(&self) -> AnimationStore {
        let mut store = AnimationStore::default();
        for (key, animation) in &self.animations {
            store.insert(key.clone(), *animation);
        }
        store
    }

    /// Explicit bounds, or every solid and entity grown by the configured margin.
    pub fn resolve_bounds(&self, config: &GameConfig) -> Rect {
        if let Some(bounds) = self.bounds.filter(Rect::is_valid) {
            return bounds;
        }
        self.solids
            .iter()
            .filter_map(|s| s.footprint(config))
            .chain(self.entities.iter().filter_map(|e| e.footprint(config)))
            .reduce(|acc, r| acc.union(&r))
            .map(|r| r.inflated(config.level.bounds_margin))
            .unwrap_or_else(|| Rect::at(Vector2::zero(), config.camera))
    }
}

/// Spawn every valid solid and entity of `level` into `world`.
///
/// Returns the number of entities spawned. Skipped entries are logged.
pub fn spawn_level(world: &mut World, level: &LevelData, config: &GameConfig, store: &AnimationStore) -> usize {
    for warning in level.warnings(config) {
        warn!("level '{}': {}", level.name, warning);
    }

    let mut spawner = Spawner {
        world,
        config,
        store,
        next_index: 0,
    };
    for solid in &level.solids {
        if solid.footprint(config).is_some() {
            spawner.solid(solid);
        }
    }
    for entity in &level.entities {
        if entity.footprint(config).is_some() {
            spawner.entity(entity);
        }
    }
    debug!("level '{}': spawned {} entities", level.name, spawner.next_index);
    spawner.next_index as usize
}

struct Spawner<'a> {
    world: &'a mut World,
    config: &'a GameConfig,
    store: &'a AnimationStore,
    next_index: u32,
}

impl Spawner<'_> {
    /// Components every drawable entity carries.
    fn base(&mut self, kind: Kind, position: Vector2, assets: &[String], layer: Option<i32>, shape: Shape) -> Entity {
        let assets = if assets.is_empty() {
            vec![kind.name().to_string()]
        } else {
            assets.to_vec()
        };
        let index = self.next_index;
        self.next_index += 1;
        self.world
            .spawn((
                kind,
                MapPosition { pos: position },
                Sprite::new(assets),
                ZIndex(layer.unwrap_or(kind.default_layer())),
                SpawnIndex(index),
                shape,
            ))
            .id()
    }

    /// Attach a state machine, its label and, when the store knows the
    /// asset, an animation driven by the state.
    fn stateful<S: EntityState>(&mut self, entity: Entity, initial: S) {
        let mut entity_mut = self.world.entity_mut(entity);
        entity_mut.insert((StateMachine::new(initial), StateLabel(initial.name())));

        let Some(asset) = entity_mut.get::<Sprite>().map(|s| s.primary().to_string()) else {
            return;
        };
        let mut controller = AnimationController::for_states::<S>(&asset, self.store);
        if controller.by_state.is_empty() && !self.store.contains(&asset) {
            return;
        }
        controller.current_key = controller.key_for(initial.name()).to_string();
        let animation = Animation::new(controller.current_key.clone());
        entity_mut.insert((controller, animation));
    }

    fn solid(&mut self, def: &SolidDef) {
        let position = Vector2::new(def.x, def.y);
        let shape = def.shape(self.config);
        match def.motion {
            Some(motion) => {
                let entity = self.base(Kind::MovingPlatform, position, &def.assets, def.layer, shape);
                self.moving(entity, position, motion.end.into(), motion.speed.into());
            }
            None => {
                let entity = self.base(Kind::Wall, position, &def.assets, def.layer, shape);
                self.world.entity_mut(entity).insert(Solid::new());
            }
        }
    }

    fn moving(&mut self, entity: Entity, start: Vector2, end: Vector2, speed: Vector2) {
        self.world
            .entity_mut(entity)
            .insert((Solid::new(), Kinematic::new(start, end, speed)));
        self.stateful(entity, PlatformState::Forward);
    }

    fn entity(&mut self, def: &EntityDef) {
        let config = self.config;
        let position = Vector2::new(def.x, def.y);
        let size = def.size(config);
        let entity = self.base(def.kind, position, &def.assets, def.layer, def.shape(config));

        match def.kind {
            Kind::Wall => {
                self.world.entity_mut(entity).insert(Solid::new());
            }
            Kind::Decoration => {
                self.world.entity_mut(entity).insert(Decoration);
                self.stateful(entity, DecorationState::Idle);
            }
            Kind::MovingPlatform => {
                let end = def.end.map(Vector2::from).unwrap_or(position);
                let speed = def.speed.map(Vector2::from).unwrap_or_default();
                self.moving(entity, position, end, speed);
            }
            Kind::DisappearingPlatform => {
                self.world.entity_mut(entity).insert((
                    Solid::new(),
                    Disappearing {
                        shake_ticks: config.platform.shake_ticks,
                        dissolved_ticks: config.platform.dissolved_ticks,
                    },
                ));
                self.stateful(entity, DisappearingState::Solid);
            }
            Kind::Switch => {
                self.world.entity_mut(entity).insert(Switch { id: def.id });
                self.stateful(entity, SwitchState::Off);
            }
            Kind::Door => {
                self.world
                    .entity_mut(entity)
                    .insert((Door::new(def.id, def.switches_waiting.iter().copied()), Solid::new()));
                self.stateful(entity, DoorState::Waiting);
            }
            Kind::Spike => {
                self.world.entity_mut(entity).insert(Spike::default());
                self.stateful(entity, SpikeState::Armed);
            }
            Kind::Spear => {
                let spear = Spear::new(
                    def.extended_ticks.unwrap_or(config.spear.extended_ticks),
                    def.retracted_ticks.unwrap_or(config.spear.retracted_ticks),
                    def.delay,
                );
                self.world.entity_mut(entity).insert(spear);
                self.stateful(entity, SpearState::Retracted);
            }
            Kind::Boss => {
                self.world.entity_mut(entity).insert((
                    Boss::new(def.health.unwrap_or(config.boss.health)),
                    RigidBody::new(),
                    BoxCollider::new(size.x, size.y),
                    Contacts::default(),
                    Solid::new(),
                ));
                self.stateful(entity, BossState::Idle);
            }
            Kind::Player => {
                self.world.entity_mut(entity).insert((
                    Player::new(position, config.player.lives),
                    InputControlled::new(config.player.run_speed, config.player.jump_speed),
                    RigidBody::new(),
                    BoxCollider::new(size.x, size.y),
                    Contacts::default(),
                ));
                self.stateful(entity, PlayerState::Idle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "name": "test",
        "background": "sky",
        "solids": [
            { "x": 0, "y": 320, "repeat": 4, "orientation": "h", "assets": ["grass"] },
            { "x": 0, "y": 0, "repeat": 0 }
        ],
        "entities": [
            { "kind": "player", "x": 10, "y": 200 },
            { "kind": "switch", "x": 100, "y": 304, "id": 1 },
            { "kind": "door", "x": 200, "y": 224, "id": 7, "switchesWaiting": [1, 9] },
            { "kind": "spear", "x": 60, "y": 256, "delay": 5 }
        ],
        "animations": { "player_walking": { "frame_count": 4 } }
    }"#;

    #[test]
    fn test_parse_applies_defaults() {
        let level = LevelData::from_json(LEVEL).unwrap();
        assert_eq!(level.solids[0].repeat, 4);
        assert_eq!(level.entities[0].repeat, 1);
        assert_eq!(level.entities[2].switches_waiting, vec![1, 9]);
        assert!(level.next.is_none());
        assert_eq!(level.animations["player_walking"].ticks_per_frame, 6);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = LevelData::from_json("{ \"name\": 3 }").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LevelData::load_from_file("./does/not/exist.json").unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn test_warnings_cover_dangling_switch_and_empty_solid() {
        let level = LevelData::from_json(LEVEL).unwrap();
        let warnings = level.warnings(&GameConfig::new());
        assert_eq!(
            warnings,
            vec![
                LevelWarning::InvalidGeometry {
                    what: "solid",
                    index: 1
                },
                LevelWarning::DanglingSwitch { door: 7, switch: 9 },
            ]
        );
    }

    #[test]
    fn test_spawn_skips_invalid_entries() {
        let level = LevelData::from_json(LEVEL).unwrap();
        let config = GameConfig::new();
        let mut world = World::new();
        let count = spawn_level(&mut world, &level, &config, &level.animation_store());
        assert_eq!(count, 5);

        let mut walls = world.query::<(&Kind, &Shape)>();
        let wall = walls
            .iter(&world)
            .find(|(kind, _)| **kind == Kind::Wall)
            .map(|(_, shape)| shape.parts.len());
        assert_eq!(wall, Some(4));
    }

    #[test]
    fn test_player_gets_state_driven_animation() {
        let level = LevelData::from_json(LEVEL).unwrap();
        let config = GameConfig::new();
        let mut world = World::new();
        spawn_level(&mut world, &level, &config, &level.animation_store());

        let mut q = world.query::<(&Player, &AnimationController, &Animation, &StateLabel)>();
        let (_, controller, animation, label) = q.single(&world).unwrap();
        assert_eq!(label.0, "idle");
        assert_eq!(controller.key_for("walking"), "player_walking");
        assert_eq!(animation.animation_key, "player");
    }

    #[test]
    fn test_bounds_grow_geometry_by_margin() {
        let level = LevelData::from_json(LEVEL).unwrap();
        let config = GameConfig::new();
        let bounds = level.resolve_bounds(&config);
        let margin = config.level.bounds_margin;
        assert_eq!(bounds.left(), -margin);
        assert_eq!(bounds.bottom(), 352.0 + margin);
    }
}
