use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::statemachine::EntityState;
use crate::resources::animationstore::AnimationStore;

/// Playback position inside an animation from the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
#[derive(Debug, Clone, Component, Serialize, Deserialize, PartialEq, Eq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_ticks: u32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_ticks: 0,
        }
    }

    /// Switch to another animation, restarting from frame 0.
    pub fn restart_with(&mut self, animation_key: &str) {
        self.animation_key.clear();
        self.animation_key.push_str(animation_key);
        self.frame_index = 0;
        self.elapsed_ticks = 0;
    }
}

// Animation Controller Component

/// Maps state names to animation keys.
#[derive(Debug, Clone, Component, PartialEq, Eq)]
pub struct AnimationController {
    pub current_key: String,
    pub by_state: FxHashMap<&'static str, String>,
    pub fallback_key: String,
}

impl AnimationController {
    pub fn new(fallback_key: impl Into<String>) -> Self {
        let fallback_key = fallback_key.into();
        Self {
            current_key: fallback_key.clone(),
            by_state: FxHashMap::default(),
            fallback_key,
        }
    }

    pub fn with_state(mut self, state: &'static str, key: impl Into<String>) -> Self {
        self.by_state.insert(state, key.into());
        self
    }

    /// Controller for every state of `S`, using `"<asset>_<state>"` keys
    /// present in the store and the bare asset for the rest.
    pub fn for_states<S: EntityState>(asset: &str, store: &AnimationStore) -> Self {
        let mut controller = Self::new(asset);
        for state in S::ALL {
            let key = format!("{}_{}", asset, state.name());
            if store.contains(&key) {
                controller.by_state.insert(state.name(), key);
            }
        }
        controller
    }

    /// Animation key for a state name.
    pub fn key_for(&self, state: &str) -> &str {
        self.by_state
            .get(state)
            .map(String::as_str)
            .unwrap_or(&self.fallback_key)
    }
}
