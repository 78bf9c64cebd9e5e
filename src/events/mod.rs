//! Event system: what the state machine tells the outside world.
//!
//! ## Key Types
//!
//! - `GameEvent`: A transition (flip, match, miss, clear, music, reset)
//! - `GameListener`: Synchronous subscriber with one hook per event
//! - `EventLog`: Listener that records events in order
//! - `AudioCues`: Listener that drives an `AudioSink`

pub mod audio;
pub mod event;
pub mod listener;

pub use audio::{AudioCues, AudioError, AudioSink, SoundEffect, AUDIO_EXTENSION, MUSIC_TRACK};
pub use event::{GameEvent, MusicSettings};
pub use listener::{EventLog, GameListener, NullListener};
