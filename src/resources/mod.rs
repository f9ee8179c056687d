//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into a scene's world and
//! accessed by systems during a tick: input state, timing, configuration,
//! message channels and presentation state. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – definitions for animations reused across entities
//! - `audio` – bridge to an external audio playback thread
//! - `camera` – view offset applied to every draw position
//! - `channel` – per-scope message channels with tick-boundary delivery
//! - `dialogue` – overlay lines and caption timing
//! - `gameconfig` – INI-backed simulation settings
//! - `input` – queued input events and per-tick action state
//! - `levelinfo` – name, background and bounds of the loaded level
//! - `rng` – seeded random source
//! - `solids` – read-only snapshot of blocking rectangles for the tick
//! - `worldtime` – simulation tick counter
pub mod animationstore;
pub mod audio;
pub mod camera;
pub mod channel;
pub mod dialogue;
pub mod gameconfig;
pub mod input;
pub mod levelinfo;
pub mod rng;
pub mod solids;
pub mod worldtime;
