//! Escapade headless runner.
//!
//! Loads a level and a configuration file, plays a scripted input sequence
//! for a fixed number of ticks and reports what happened. The final draw
//! list can be dumped as JSON for inspection by a renderer or a test.
//!
//! # Input script
//!
//! ```json
//! [
//!   { "tick": 0, "action": "right", "pressed": true },
//!   { "tick": 30, "action": "jump", "pressed": true },
//!   { "tick": 31, "action": "jump", "pressed": false }
//! ]
//! ```
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level levels/demo.json --ticks 600 --dump frame.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use escapade::events::input::{InputAction, InputEvent};
use escapade::game::Game;
use escapade::resources::gameconfig::GameConfig;

/// Escapade platformer simulation
#[derive(Parser)]
#[command(version, about = "Runs an Escapade level headless and reports the outcome.")]
struct Cli {
    /// Level file (JSON).
    #[arg(long, value_name = "PATH", default_value = "levels/demo.json")]
    level: String,

    /// Additional level files, reachable through scene transitions.
    #[arg(long = "with", value_name = "PATH")]
    extra_levels: Vec<String>,

    /// Configuration file (INI). Defaults are used when it cannot be read.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Scripted input events (JSON).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Seed for boss cooldown jitter; overrides the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final frame as JSON to this path ("-" for stdout).
    #[arg(long, value_name = "PATH")]
    dump: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScriptedInput {
    tick: u64,
    action: InputAction,
    #[serde(default = "pressed_by_default")]
    pressed: bool,
}

fn pressed_by_default() -> bool {
    true
}

fn load_script(path: &PathBuf) -> Result<Vec<ScriptedInput>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let mut script: Vec<ScriptedInput> =
        serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    // Stable: events of the same tick keep file order.
    script.sort_by_key(|entry| entry.tick);
    Ok(script)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("using default configuration: {}", e);
    }
    if let Some(seed) = cli.seed {
        config.level.seed = seed;
    }

    let script = match cli.input.as_ref().map(load_script).transpose() {
        Ok(script) => script.unwrap_or_default(),
        Err(e) => {
            error!("failed to read input script {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut game = Game::new(config);
    for path in &cli.extra_levels {
        if let Err(e) = game.register_file(path) {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    }
    let first = match game.register_file(&cli.level) {
        Ok(name) => name,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = game.start(&first) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let mut pending = script.iter().peekable();
    for tick in 0..cli.ticks {
        while let Some(entry) = pending.next_if(|entry| entry.tick <= tick) {
            game.handle_event(InputEvent {
                action: entry.action,
                pressed: entry.pressed,
            });
        }

        let report = game.tick();
        if let Some(loaded) = &report.loaded {
            info!("tick {}: entered scene '{}'", tick, loaded);
        }
        for request in &report.menu {
            info!("tick {}: menu request {:?}", tick, request);
        }
        for request in &report.cutscene {
            info!("tick {}: cutscene request {:?}", tick, request);
        }
        if let Some(scene) = game.scene() {
            for message in scene.scene_messages() {
                info!("tick {}: {:?}", tick, message);
            }
        }
    }

    let Some(scene) = game.scene_mut() else {
        return ExitCode::SUCCESS;
    };
    let frame = scene.draw();
    info!(
        "scene '{}' after {} ticks: {} draw items, camera at ({}, {})",
        scene.name(),
        frame.tick,
        frame.items.len(),
        frame.camera.x,
        frame.camera.y
    );

    if let Some(target) = cli.dump {
        let json = match serde_json::to_string_pretty(&frame) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize frame: {}", e);
                return ExitCode::FAILURE;
            }
        };
        if target == "-" {
            println!("{}", json);
        } else if let Err(e) = std::fs::write(&target, json) {
            error!("failed to write {}: {}", target, e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
