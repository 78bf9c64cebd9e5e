//! Core engine types: configuration, errors, RNG and game state.
//!
//! This module contains the building blocks the state machine is made of.
//! It has no knowledge of audio, presentation or timing.

pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use config::{GameConfig, DEFAULT_PAIR_COUNT, DEFAULT_RESOLVE_DELAY_MS};
pub use error::{GameError, PoolError, SelectError, SessionError, StateError};
pub use rng::GameRng;
pub use state::{GameSnapshot, GameState, PendingSelection};
