//! Audio cues.
//!
//! `AudioCues` turns game events into calls on an `AudioSink`, the seam a
//! front-end implements with its real playback backend. Playback is best
//! effort: a missing asset or a failing device is logged and the game
//! carries on in silence.

use thiserror::Error;

use super::event::MusicSettings;
use super::listener::GameListener;
use crate::cards::{CardId, ImageRef};

/// File extension of every bundled audio asset.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Asset name of the background music track.
pub const MUSIC_TRACK: &str = "bgm";

/// One-shot sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Flip,
    Match,
    Miss,
    Clear,
}

impl SoundEffect {
    /// Bundled asset name, without extension.
    #[must_use]
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Flip => "flip",
            SoundEffect::Match => "match",
            SoundEffect::Miss => "miss",
            SoundEffect::Clear => "clear",
        }
    }

    /// Bundled asset file name, e.g. `flip.mp3`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.{}", self.asset_name(), AUDIO_EXTENSION)
    }
}

/// Playback failures reported by an `AudioSink`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("audio asset {0} not found")]
    MissingAsset(String),

    #[error("playback of {asset} failed: {reason}")]
    Playback { asset: String, reason: String },
}

/// Playback backend supplied by the media adapter.
pub trait AudioSink {
    /// Play a one-shot effect, replacing any effect still playing.
    fn play_effect(&mut self, effect: SoundEffect) -> Result<(), AudioError>;

    /// Start the background music track.
    fn start_music(&mut self, music: MusicSettings) -> Result<(), AudioError>;

    /// Stop the background music. Stopping silence is not an error.
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Listener that plays the sound for each event.
#[derive(Debug, Default)]
pub struct AudioCues<S> {
    sink: S,
}

impl<S: AudioSink> AudioCues<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn effect(&mut self, effect: SoundEffect) {
        if let Err(err) = self.sink.play_effect(effect) {
            tracing::warn!(%err, effect = effect.asset_name(), "Failed to play sound effect");
        }
    }
}

impl<S: AudioSink> GameListener for AudioCues<S> {
    fn on_flip(&mut self, _card: CardId) {
        self.effect(SoundEffect::Flip);
    }

    fn on_match(&mut self, _image: ImageRef, _cards: [CardId; 2]) {
        self.effect(SoundEffect::Match);
    }

    fn on_miss(&mut self, _cards: [CardId; 2]) {
        self.effect(SoundEffect::Miss);
    }

    fn on_clear(&mut self) {
        self.effect(SoundEffect::Clear);
    }

    fn on_bgm_start(&mut self, music: MusicSettings) {
        if let Err(err) = self.sink.start_music(music) {
            tracing::warn!(%err, track = MUSIC_TRACK, "Failed to start background music");
        }
    }

    fn on_bgm_stop(&mut self) {
        if let Err(err) = self.sink.stop_music() {
            tracing::warn!(%err, track = MUSIC_TRACK, "Failed to stop background music");
        }
    }
}
