//! Z-index component for render ordering.
//!
//! The [`ZIndex`] component controls the drawing order of entities. Entities
//! with higher z-index values are drawn on top of those with lower values;
//! equal values keep spawn order.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

/// Position of the entity in the level's spawn sequence, used to keep draw
/// order stable between entities on the same layer.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnIndex(pub u32);
