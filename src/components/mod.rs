//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! a scene. Components define data such as position, bodies, solids,
//! per-kind state and rendering hints; behaviour lives in
//! [`crate::systems`].
//!
//! Submodules overview:
//! - [`animation`] – playback state and a state-driven animation controller
//! - [`boss`] – target-tracking boss and its state table
//! - [`boxcollider`] – axis-aligned extent of a body
//! - [`contacts`] – per-tick collision flags and standing surface
//! - [`decoration`] – purely visual entities
//! - [`door`] – switch-gated door and its waiting set
//! - [`hazard`] – spikes and timed spears
//! - [`inputcontrolled`] – marks bodies driven by player input
//! - [`kind`] – tag naming the level-data kind of an entity
//! - [`mapposition`] – world-space position (top-left anchor) for an entity
//! - [`outofbounds`] – marker for bodies outside the level
//! - [`platform`] – moving and disappearing platform state tables
//! - [`player`] – player lives, spawn point and state table
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`shape`] – ordered composite rectangles for tiled geometry
//! - [`solid`] – obstacles, kinematic motion and dissolve timings
//! - [`sprite`] – asset keys used by the draw pass
//! - [`statemachine`] – generic per-kind state machine
//! - [`switch`] – pressure switches
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod boss;
pub mod boxcollider;
pub mod contacts;
pub mod decoration;
pub mod door;
pub mod hazard;
pub mod inputcontrolled;
pub mod kind;
pub mod mapposition;
pub mod outofbounds;
pub mod platform;
pub mod player;
pub mod rigidbody;
pub mod shape;
pub mod solid;
pub mod sprite;
pub mod statemachine;
pub mod switch;
pub mod zindex;
