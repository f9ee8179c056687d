//! Discrete per-entity state with an explicit transition table.
//!
//! Every entity kind defines its own state enum implementing [`EntityState`].
//! The enum lists its states, gives each a stable name (used for animation
//! keys and audio cues), and declares which transitions are legal. The
//! generic [`StateMachine`] component stores the current state and refuses
//! anything the table does not allow.
//!
//! # Transition Flow
//!
//! 1. A kind-specific system calls [`StateMachine::transition_to`].
//! 2. The transition is applied immediately and recorded for the tick.
//! 3. At the end of the tick
//!    [`sync_state`](crate::systems::statemachine::sync_state) drains the
//!    record, updates the entity's [`StateLabel`], writes an
//!    [`AudioCue`](crate::events::audio::AudioCue) per transition and
//!    advances `ticks_in_state`.
//!
//! # Example
//!
//! ```ignore
//! let mut door = StateMachine::new(DoorState::Waiting);
//! assert!(!door.transition_to(DoorState::Open)); // must pass through Opening
//! assert!(door.transition_to(DoorState::Opening));
//! ```

use std::fmt;

use bevy_ecs::prelude::Component;
use log::debug;
use smallvec::SmallVec;

/// A per-kind state enum.
pub trait EntityState: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Name of the entity kind owning this state, used as the audio cue source.
    const SOURCE: &'static str;
    /// Every state of the kind, in declaration order.
    const ALL: &'static [Self];

    /// Stable lowercase name of the state.
    fn name(self) -> &'static str;

    /// Whether the table permits moving from `self` to `next`.
    fn allows(self, next: Self) -> bool;
}

#[derive(Component, Clone, Debug)]
pub struct StateMachine<S: EntityState> {
    current: S,
    previous: Option<S>,
    ticks_in_state: u32,
    transitions: SmallVec<[(S, S); 2]>,
}

impl<S: EntityState> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            previous: None,
            ticks_in_state: 0,
            transitions: SmallVec::new(),
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    pub fn is(&self, state: S) -> bool {
        self.current == state
    }

    /// Completed ticks spent in the current state. Zero on the entry tick.
    pub fn ticks_in_state(&self) -> u32 {
        self.ticks_in_state
    }

    /// Apply a transition if the table allows it.
    ///
    /// Returns `false` (and leaves the state untouched) for a transition to
    /// the current state or one the table forbids.
    pub fn transition_to(&mut self, next: S) -> bool {
        if next == self.current {
            return false;
        }
        if !self.current.allows(next) {
            debug!(
                "{}: ignored transition {} -> {}",
                S::SOURCE,
                self.current.name(),
                next.name()
            );
            return false;
        }
        debug!("{}: {} -> {}", S::SOURCE, self.current.name(), next.name());
        self.transitions.push((self.current, next));
        self.previous = Some(self.current);
        self.current = next;
        self.ticks_in_state = 0;
        true
    }

    /// Transitions applied since the last call, oldest first.
    pub fn drain_transitions(&mut self) -> SmallVec<[(S, S); 2]> {
        std::mem::take(&mut self.transitions)
    }

    /// Count one more completed tick in the current state.
    pub fn tick(&mut self) {
        self.ticks_in_state = self.ticks_in_state.saturating_add(1);
    }
}

/// Name of the entity's current state, mirrored for presentation.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateLabel(pub &'static str);
