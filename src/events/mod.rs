//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`audio`] – state-transition cues for the audio boundary
//! - [`input`] – logical key-down/key-up events
//! - [`messages`] – scoped menu/scene/cutscene messages
pub mod audio;
pub mod input;
pub mod messages;
