//! Animation resource registry.
//!
//! A minimal store for animation definitions shared by every entity of a
//! scene. Systems look up an animation by a string key and drive playback
//! from the immutable parameters stored here.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

impl AnimationStore {
    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }
}

/// Immutable data describing a frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationResource {
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Ticks each frame stays on screen.
    #[serde(default = "default_ticks_per_frame")]
    pub ticks_per_frame: u32,
    /// Whether the animation restarts after the last frame.
    #[serde(default = "default_looped")]
    pub looped: bool,
}

fn default_ticks_per_frame() -> u32 {
    6
}

fn default_looped() -> bool {
    true
}

impl AnimationResource {
    pub fn new(frame_count: usize, ticks_per_frame: u32, looped: bool) -> Self {
        Self {
            frame_count,
            ticks_per_frame,
            looped,
        }
    }
}
