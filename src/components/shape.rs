//! Composite rectangle layout for walls, platforms and hazards.
//!
//! Level geometry is described as a tile placed `repeat` times along an
//! [`Orientation`]. The resulting [`Shape`] keeps the ordered parts in
//! entity-local space so that both collision and rendering can walk them.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::{Rect, Vector2};

/// Tiling direction of a composite shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "h", alias = "horizontal")]
    Horizontal,
    #[serde(rename = "v", alias = "vertical")]
    Vertical,
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Shape {
    pub parts: SmallVec<[Rect; 4]>,
    pub orientation: Orientation,
}

impl Shape {
    /// A single rectangle of the given size at the entity position.
    pub fn single(width: f32, height: f32) -> Self {
        let mut parts = SmallVec::new();
        parts.push(Rect::new(0.0, 0.0, width, height));
        Self {
            parts,
            orientation: Orientation::Horizontal,
        }
    }

    /// `repeat` tiles of `tile` size laid out along `orientation`.
    pub fn tiled(tile: Vector2, repeat: u32, orientation: Orientation) -> Self {
        let parts = (0..repeat)
            .map(|i| {
                let step = i as f32;
                match orientation {
                    Orientation::Horizontal => Rect::new(step * tile.x, 0.0, tile.x, tile.y),
                    Orientation::Vertical => Rect::new(0.0, step * tile.y, tile.x, tile.y),
                }
            })
            .collect();
        Self { parts, orientation }
    }

    /// Parts translated to world space.
    pub fn world_rects(&self, position: Vector2) -> impl Iterator<Item = Rect> + '_ {
        self.parts.iter().map(move |part| part.translated(position))
    }

    /// Local-space union of all parts.
    pub fn bounds(&self) -> Option<Rect> {
        let mut parts = self.parts.iter();
        let first = *parts.next()?;
        Some(parts.fold(first, |acc, part| acc.union(part)))
    }

    /// Index into an asset sequence for part `index`.
    ///
    /// A single asset covers every part. Longer sequences map the first and
    /// last assets to the end parts and reuse the inner ones in between
    /// (e.g. top/mid/bottom pillars).
    pub fn asset_index(&self, index: usize, asset_count: usize) -> usize {
        if asset_count <= 1 {
            return 0;
        }
        let last_part = self.parts.len().saturating_sub(1);
        if index == 0 {
            0
        } else if index >= last_part {
            asset_count - 1
        } else if asset_count == 2 {
            0
        } else {
            index.clamp(1, asset_count - 2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiled_horizontal() {
        let s = Shape::tiled(Vector2::new(32.0, 16.0), 3, Orientation::Horizontal);
        assert_eq!(s.parts.len(), 3);
        assert_eq!(s.parts[2], Rect::new(64.0, 0.0, 32.0, 16.0));
        assert_eq!(s.bounds(), Some(Rect::new(0.0, 0.0, 96.0, 16.0)));
    }

    #[test]
    fn test_tiled_vertical_world_rects() {
        let s = Shape::tiled(Vector2::new(32.0, 32.0), 2, Orientation::Vertical);
        let rects: Vec<Rect> = s.world_rects(Vector2::new(10.0, 100.0)).collect();
        assert_eq!(rects[0], Rect::new(10.0, 100.0, 32.0, 32.0));
        assert_eq!(rects[1], Rect::new(10.0, 132.0, 32.0, 32.0));
    }

    #[test]
    fn test_zero_repeat_has_no_bounds() {
        let s = Shape::tiled(Vector2::new(32.0, 32.0), 0, Orientation::Vertical);
        assert!(s.bounds().is_none());
    }

    #[test]
    fn test_asset_index_sequences() {
        let s = Shape::tiled(Vector2::new(1.0, 1.0), 5, Orientation::Vertical);
        let picked: Vec<usize> = (0..5).map(|i| s.asset_index(i, 3)).collect();
        assert_eq!(picked, vec![0, 1, 1, 1, 2]);
        assert_eq!(s.asset_index(3, 1), 0);
    }

    #[test]
    fn test_orientation_deserializes_short_and_long() {
        let h: Orientation = serde_json::from_str("\"h\"").unwrap();
        let v: Orientation = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(h, Orientation::Horizontal);
        assert_eq!(v, Orientation::Vertical);
    }
}
