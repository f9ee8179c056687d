//! Scoped inter-entity messages.
//!
//! Each scope has its own [`MessageChannel`](crate::resources::channel::MessageChannel)
//! resource. Messages posted during a tick are delivered at the start of the
//! next one.

use bevy_ecs::prelude::Entity;
use serde::{Deserialize, Serialize};

/// Messages exchanged by the entities of a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneMessage {
    /// A switch turned on.
    SwitchActivated { id: u32 },
    /// A door finished opening.
    DoorOpened { id: u32 },
    /// `player` was touched by the hazard or boss `source`.
    PlayerHit { player: Entity, source: Entity },
    /// `boss` was struck by the attack of `player`.
    BossStruck { boss: Entity, player: Entity },
    BossDefeated { boss: Entity },
    PlayerDefeated { player: Entity },
    /// A body left the level bounds.
    BodyOutOfBounds { entity: Entity },
    /// Request to replace the current scene.
    Transition { target: String },
}

/// Requests addressed to the menu layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuMessage {
    Transition { target: String },
}

/// Requests addressed to the cutscene layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CutsceneMessage {
    Transition { target: String },
}

/// A message tagged with its scope, as written in level data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "message", rename_all = "snake_case")]
pub enum ScopedMessage {
    Menu(MenuMessage),
    Scene(SceneTransition),
    Cutscene(CutsceneMessage),
}

/// The only scene message level data may post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneTransition {
    Transition { target: String },
}

impl From<SceneTransition> for SceneMessage {
    fn from(value: SceneTransition) -> Self {
        match value {
            SceneTransition::Transition { target } => SceneMessage::Transition { target },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_message_from_json() {
        let json = r#"{"scope":"cutscene","message":{"kind":"transition","target":"pig_cutscene"}}"#;
        let msg: ScopedMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ScopedMessage::Cutscene(CutsceneMessage::Transition {
                target: "pig_cutscene".into()
            })
        );
    }

    #[test]
    fn test_scene_transition_converts() {
        let msg: SceneMessage = SceneTransition::Transition {
            target: "forest_01".into(),
        }
        .into();
        assert_eq!(
            msg,
            SceneMessage::Transition {
                target: "forest_01".into()
            }
        );
    }
}
