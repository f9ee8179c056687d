//! Escapade platformer simulation core.
//!
//! This crate exposes the ECS components, resources, systems, and events of
//! a 2D platformer scene, plus the level loader and scene director, for use
//! by a host renderer and in integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod geometry;
pub mod level;
pub mod resources;
pub mod scene;
pub mod systems;
