use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// One overlay line, positioned in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub style: String,
}

/// Dialogue overlay state of a scene.
///
/// The caption (line 0) is shown for `caption_ticks` ticks from scene
/// start and then hidden.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Dialogue {
    pub lines: Vec<DialogueLine>,
    pub caption_ticks: u64,
    /// Index of the line currently displayed, if any.
    pub active: Option<usize>,
}

impl Dialogue {
    pub fn new(lines: Vec<DialogueLine>, caption_ticks: u64) -> Self {
        let active = (!lines.is_empty() && caption_ticks > 0).then_some(0);
        Self {
            lines,
            caption_ticks,
            active,
        }
    }

    /// Recompute the visible line for the scene clock.
    pub fn update(&mut self, elapsed_ticks: u64) {
        self.active = (!self.lines.is_empty() && elapsed_ticks < self.caption_ticks).then_some(0);
    }

    pub fn active_line(&self) -> Option<&DialogueLine> {
        self.active.and_then(|i| self.lines.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> DialogueLine {
        DialogueLine {
            text: text.into(),
            x: 0.0,
            y: 0.0,
            style: String::new(),
        }
    }

    #[test]
    fn test_caption_hides_after_duration() {
        let mut d = Dialogue::new(vec![line("Find the exit")], 3);
        assert_eq!(d.active_line().map(|l| l.text.as_str()), Some("Find the exit"));
        d.update(2);
        assert!(d.active_line().is_some());
        d.update(3);
        assert!(d.active_line().is_none());
    }

    #[test]
    fn test_empty_dialogue_shows_nothing() {
        let d = Dialogue::new(Vec::new(), 100);
        assert!(d.active_line().is_none());
    }
}
