//! Game configuration resource.
//!
//! Manages simulation settings loaded from an INI configuration file.
//! Provides defaults for a safe startup; any key missing from the file keeps
//! its default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! gravity = 0.8
//! max_speed = 20
//!
//! [player]
//! run_speed = 4
//! jump_speed = 14
//! lives = 3
//!
//! [boss]
//! health = 3
//! sight_range = 320
//!
//! [door]
//! opening_ticks = 30
//!
//! [spear]
//! extended_ticks = 60
//! retracted_ticks = 90
//!
//! [platform]
//! shake_ticks = 30
//! dissolved_ticks = 120
//!
//! [camera]
//! width = 640
//! height = 360
//!
//! [level]
//! bounds_margin = 256
//! seed = 1
//!
//! [dialogue]
//! caption_ticks = 300
//!
//! [sizes]
//! tile_width = 32
//! tile_height = 32
//! player_width = 28
//! player_height = 48
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::kind::Kind;
use crate::geometry::Vector2;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    /// Downward acceleration, units per tick squared.
    pub gravity: f32,
    /// Per-axis speed limit, units per tick.
    pub max_speed: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            max_speed: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub run_speed: f32,
    pub jump_speed: f32,
    pub lives: u32,
    pub landing_ticks: u32,
    pub attack_ticks: u32,
    /// Width of the strike box in front of the player.
    pub attack_reach: f32,
    pub hurt_ticks: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            run_speed: 4.0,
            jump_speed: 14.0,
            lives: 3,
            landing_ticks: 6,
            attack_ticks: 12,
            attack_reach: 24.0,
            hurt_ticks: 45,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossSettings {
    pub health: u32,
    pub sight_range: f32,
    pub attack_range: f32,
    pub chase_speed: f32,
    /// Ticks between the start of an attack and its strike.
    pub windup_ticks: u32,
    /// Ticks the attack lasts after the strike.
    pub attack_ticks: u32,
    pub cooldown_ticks: u32,
    /// Upper bound of the random extra cooldown.
    pub cooldown_jitter: u32,
    pub hurt_ticks: u32,
    pub attack_reach: f32,
}

impl Default for BossSettings {
    fn default() -> Self {
        Self {
            health: 3,
            sight_range: 320.0,
            attack_range: 72.0,
            chase_speed: 2.0,
            windup_ticks: 20,
            attack_ticks: 15,
            cooldown_ticks: 60,
            cooldown_jitter: 30,
            hurt_ticks: 30,
            attack_reach: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSettings {
    pub opening_ticks: u32,
}

impl Default for DoorSettings {
    fn default() -> Self {
        Self { opening_ticks: 30 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpearSettings {
    pub extended_ticks: u32,
    pub retracted_ticks: u32,
}

impl Default for SpearSettings {
    fn default() -> Self {
        Self {
            extended_ticks: 60,
            retracted_ticks: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSettings {
    pub shake_ticks: u32,
    pub dissolved_ticks: u32,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            shake_ticks: 30,
            dissolved_ticks: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSettings {
    /// Margin added around the solids when a level has no explicit bounds.
    pub bounds_margin: f32,
    pub seed: u64,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            bounds_margin: 256.0,
            seed: 1,
        }
    }
}

/// Default sizes of level entities that do not give one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSettings {
    pub tile: Vector2,
    pub player: Vector2,
    pub boss: Vector2,
    pub switch: Vector2,
    pub door: Vector2,
    pub spike: Vector2,
    pub spear: Vector2,
    pub platform: Vector2,
    pub decoration: Vector2,
}

impl Default for SizeSettings {
    fn default() -> Self {
        Self {
            tile: Vector2::new(32.0, 32.0),
            player: Vector2::new(28.0, 48.0),
            boss: Vector2::new(64.0, 64.0),
            switch: Vector2::new(32.0, 16.0),
            door: Vector2::new(32.0, 96.0),
            spike: Vector2::new(32.0, 16.0),
            spear: Vector2::new(16.0, 64.0),
            platform: Vector2::new(96.0, 16.0),
            decoration: Vector2::new(32.0, 32.0),
        }
    }
}

impl SizeSettings {
    pub fn for_kind(&self, kind: Kind) -> Vector2 {
        match kind {
            Kind::Wall => self.tile,
            Kind::Player => self.player,
            Kind::Boss => self.boss,
            Kind::Switch => self.switch,
            Kind::Door => self.door,
            Kind::Spike => self.spike,
            Kind::Spear => self.spear,
            Kind::MovingPlatform | Kind::DisappearingPlatform => self.platform,
            Kind::Decoration => self.decoration,
        }
    }
}

/// Game configuration resource.
///
/// Inserted into every scene; systems read the section they need.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub physics: PhysicsSettings,
    pub player: PlayerSettings,
    pub boss: BossSettings,
    pub door: DoorSettings,
    pub spear: SpearSettings,
    pub platform: PlatformSettings,
    /// Viewport size of the camera.
    pub camera: Vector2,
    pub level: LevelSettings,
    /// Ticks the dialogue caption stays visible.
    pub caption_ticks: u64,
    pub sizes: SizeSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            physics: PhysicsSettings::default(),
            player: PlayerSettings::default(),
            boss: BossSettings::default(),
            door: DoorSettings::default(),
            spear: SpearSettings::default(),
            platform: PlatformSettings::default(),
            camera: Vector2::new(640.0, 360.0),
            level: LevelSettings::default(),
            caption_ticks: 300,
            sizes: SizeSettings::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [physics] section
        read_f32(config, "physics", "gravity", &mut self.physics.gravity);
        read_f32(config, "physics", "max_speed", &mut self.physics.max_speed);

        // [player] section
        read_f32(config, "player", "run_speed", &mut self.player.run_speed);
        read_f32(config, "player", "jump_speed", &mut self.player.jump_speed);
        read_u32(config, "player", "lives", &mut self.player.lives);
        read_u32(config, "player", "landing_ticks", &mut self.player.landing_ticks);
        read_u32(config, "player", "attack_ticks", &mut self.player.attack_ticks);
        read_f32(config, "player", "attack_reach", &mut self.player.attack_reach);
        read_u32(config, "player", "hurt_ticks", &mut self.player.hurt_ticks);

        // [boss] section
        read_u32(config, "boss", "health", &mut self.boss.health);
        read_f32(config, "boss", "sight_range", &mut self.boss.sight_range);
        read_f32(config, "boss", "attack_range", &mut self.boss.attack_range);
        read_f32(config, "boss", "chase_speed", &mut self.boss.chase_speed);
        read_u32(config, "boss", "windup_ticks", &mut self.boss.windup_ticks);
        read_u32(config, "boss", "attack_ticks", &mut self.boss.attack_ticks);
        read_u32(config, "boss", "cooldown_ticks", &mut self.boss.cooldown_ticks);
        read_u32(config, "boss", "cooldown_jitter", &mut self.boss.cooldown_jitter);
        read_u32(config, "boss", "hurt_ticks", &mut self.boss.hurt_ticks);
        read_f32(config, "boss", "attack_reach", &mut self.boss.attack_reach);

        read_u32(config, "door", "opening_ticks", &mut self.door.opening_ticks);
        read_u32(config, "spear", "extended_ticks", &mut self.spear.extended_ticks);
        read_u32(config, "spear", "retracted_ticks", &mut self.spear.retracted_ticks);
        read_u32(config, "platform", "shake_ticks", &mut self.platform.shake_ticks);
        read_u32(config, "platform", "dissolved_ticks", &mut self.platform.dissolved_ticks);

        // [camera] section
        read_f32(config, "camera", "width", &mut self.camera.x);
        read_f32(config, "camera", "height", &mut self.camera.y);

        // [level] section
        read_f32(config, "level", "bounds_margin", &mut self.level.bounds_margin);
        if let Some(seed) = config.getuint("level", "seed").ok().flatten() {
            self.level.seed = seed;
        }

        if let Some(ticks) = config.getuint("dialogue", "caption_ticks").ok().flatten() {
            self.caption_ticks = ticks;
        }

        // [sizes] section
        let sizes = &mut self.sizes;
        for (prefix, size) in [
            ("tile", &mut sizes.tile),
            ("player", &mut sizes.player),
            ("boss", &mut sizes.boss),
            ("switch", &mut sizes.switch),
            ("door", &mut sizes.door),
            ("spike", &mut sizes.spike),
            ("spear", &mut sizes.spear),
            ("platform", &mut sizes.platform),
            ("decoration", &mut sizes.decoration),
        ] {
            read_f32(config, "sizes", &format!("{}_width", prefix), &mut size.x);
            read_f32(config, "sizes", &format!("{}_height", prefix), &mut size.y);
        }
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn read_u32(config: &Ini, section: &str, key: &str, target: &mut u32) {
    if let Some(value) = config.getuint(section, key).ok().flatten() {
        *target = value.min(u32::MAX as u64) as u32;
    }
}
