//! Game configuration.
//!
//! A `GameConfig` fixes everything about a session that is not chosen by
//! the player: how many pairs the deck holds, how long a revealed pair
//! stays visible before it is resolved, and the background music settings.
//!
//! The engine never hardcodes these values outside of `Default`.

use serde::{Deserialize, Serialize};

/// Default number of distinct images (and therefore pairs) per game.
pub const DEFAULT_PAIR_COUNT: usize = 8;

/// Default delay before a revealed pair is resolved, in milliseconds.
pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 1_000;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of distinct images in the pool (default: 8).
    /// The deck holds twice as many cards.
    pub pair_count: usize,

    /// Time a revealed pair stays face-up before evaluation (default: 1000 ms).
    pub resolve_delay_ms: u64,

    /// Background music volume in `0.0..=1.0` (default: 0.5).
    pub music_volume: f32,

    /// Loop the background music until stopped (default: true).
    pub loop_music: bool,

    /// Shuffle seed. `None` seeds every deal from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            music_volume: 0.5,
            loop_music: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Number of cards on the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.pair_count.saturating_mul(2)
    }

    /// Set the number of pairs, at least one.
    #[must_use]
    pub fn with_pair_count(mut self, pairs: usize) -> Self {
        self.pair_count = pairs.max(1);
        self
    }

    /// Set the resolution delay.
    #[must_use]
    pub fn with_resolve_delay_ms(mut self, delay_ms: u64) -> Self {
        self.resolve_delay_ms = delay_ms;
        self
    }

    /// Set the background music volume, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_music_volume(mut self, volume: f32) -> Self {
        self.music_volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Set a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
