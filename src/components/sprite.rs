use bevy_ecs::prelude::Component;

/// Sprite is identified by a sequence of asset keys.
///
/// Single-part entities use the first asset (or their animation). Composite
/// shapes pick one asset per part with
/// [`Shape::asset_index`](super::shape::Shape::asset_index).
#[derive(Component, Clone, Debug, Default)]
pub struct Sprite {
    pub assets: Vec<String>,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(assets: Vec<String>) -> Self {
        Self {
            assets,
            flip_h: false,
        }
    }

    /// Primary asset key, empty when the entity has none.
    pub fn primary(&self) -> &str {
        self.assets.first().map(String::as_str).unwrap_or("")
    }
}
