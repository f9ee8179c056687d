//! Read-only view of every blocking rectangle for the current tick.
//!
//! Built by [`collect_solids`](crate::systems::platform::collect_solids) once
//! all solid motion of the tick is done; every body of the tick resolves
//! against the same snapshot.

use bevy_ecs::prelude::{Entity, Resource};

use crate::geometry::{Rect, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidRect {
    /// Owner of the rectangle; `None` for anonymous geometry.
    pub entity: Option<Entity>,
    pub rect: Rect,
    /// Motion of the owner during this tick.
    pub displacement: Vector2,
}

impl SolidRect {
    pub fn fixed(rect: Rect) -> Self {
        Self {
            entity: None,
            rect,
            displacement: Vector2::zero(),
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SolidSnapshot {
    pub rects: Vec<SolidRect>,
}

impl SolidSnapshot {
    /// This tick's displacement of a solid entity, zero when unknown.
    pub fn displacement_of(&self, entity: Entity) -> Vector2 {
        self.rects
            .iter()
            .find(|s| s.entity == Some(entity))
            .map(|s| s.displacement)
            .unwrap_or_default()
    }

    /// Whether any rectangle of the snapshot overlaps `rect`.
    pub fn overlaps(&self, rect: &Rect, skip: Option<Entity>) -> bool {
        self.rects
            .iter()
            .any(|s| (skip.is_none() || s.entity != skip) && s.rect.intersects(rect))
    }
}
