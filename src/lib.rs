//! # concentration
//!
//! Game engine for concentration, the memory game: a grid of face-down
//! cards hides every photo of a pool twice, and the player turns two cards
//! at a time until all pairs are found.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: Only the state machine mutates game state. Everything
//!    else reads snapshots or sends commands.
//!
//! 2. **Identity, Not Pixels**: Photos are compared by the `ImageRef`
//!    assigned when they enter the pool.
//!
//! 3. **No Hidden Clocks**: The delay before a revealed pair is resolved is
//!    a scheduled task on the session's own queue, driven by the caller.
//!
//! ## Architecture
//!
//! - **Events Out**: Flips, matches, misses, completion and music cues are
//!   reported synchronously to a `GameListener`. Audio is one subscriber.
//!
//! - **Epoch Tickets**: A revealed pair is resolved through a ticket tagged
//!   with the deal epoch, so a reset silently invalidates it.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG, game state and snapshots
//! - `cards`: Image identities, the image pool, cards and deck building
//! - `events`: Game events, listeners and audio cues
//! - `rules`: The state machine and the match evaluator
//! - `session`: Command queue and scheduler around a game

pub mod cards;
pub mod core;
pub mod events;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameError, GameRng, GameSnapshot, GameState, PoolError, SelectError,
    SessionError, StateError,
};

pub use crate::cards::{build_deck, layout_deck, Card, CardFace, CardId, ImagePool, ImageRef};

pub use crate::events::{
    AudioCues, AudioError, AudioSink, EventLog, GameEvent, GameListener, MusicSettings,
    NullListener, SoundEffect,
};

pub use crate::rules::{GameMachine, MatchOutcome, ResolutionTicket, SelectOutcome};

pub use crate::session::{Command, Phase, Scheduler, Session};
