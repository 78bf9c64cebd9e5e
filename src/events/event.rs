//! Game event types.
//!
//! Events are emitted by the state machine at the moment a transition
//! happens. They carry everything a subscriber needs (which cards, which
//! image) so presentation and audio never have to query the state back.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, ImageRef};
use crate::core::GameConfig;

/// Background music parameters for `GameEvent::MusicStarted`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MusicSettings {
    /// Repeat until stopped.
    pub looping: bool,
    /// Volume in `0.0..=1.0`.
    pub volume: f32,
}

impl MusicSettings {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            looping: config.loop_music,
            volume: config.music_volume,
        }
    }
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Something that happened in a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was turned face-up by the player.
    Flipped { card: CardId },
    /// Two revealed cards showed the same image.
    Matched { image: ImageRef, cards: [CardId; 2] },
    /// Two revealed cards differed and were turned back.
    Missed { cards: [CardId; 2] },
    /// The last pair was found.
    Cleared,
    /// Background music should start.
    MusicStarted(MusicSettings),
    /// Background music should stop.
    MusicStopped,
    /// A new deck was dealt over a game in progress.
    Reset,
}

impl GameEvent {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Flipped { .. } => "flip",
            GameEvent::Matched { .. } => "match",
            GameEvent::Missed { .. } => "miss",
            GameEvent::Cleared => "clear",
            GameEvent::MusicStarted(_) => "bgm_start",
            GameEvent::MusicStopped => "bgm_stop",
            GameEvent::Reset => "reset",
        }
    }
}
