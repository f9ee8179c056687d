use bevy_ecs::prelude::Resource;

use crate::geometry::Rect;

/// Static facts about the loaded level.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelInfo {
    pub name: String,
    /// Background reference handed to the renderer.
    pub background: String,
    /// Area outside of which bodies are reported out of bounds.
    pub bounds: Rect,
    /// Scene to go to when the level is finished.
    pub next: Option<String>,
}
