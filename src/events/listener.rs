//! Event subscribers.
//!
//! The state machine calls a `GameListener` synchronously for every
//! transition. All hooks default to no-ops so a subscriber only implements
//! what it cares about.
//!
//! ## Fan-out
//!
//! A pair `(A, B)` of listeners is itself a listener that forwards to both,
//! so a front-end can attach its audio bridge and its renderer at once.
//! Pairs and boxes forward every hook as well as `on_event`, so calling a
//! hook directly reaches the same subscribers as dispatching the event.

use super::event::{GameEvent, MusicSettings};
use crate::cards::{CardId, ImageRef};

/// Subscriber to state machine transitions.
pub trait GameListener {
    fn on_flip(&mut self, _card: CardId) {}

    fn on_match(&mut self, _image: ImageRef, _cards: [CardId; 2]) {}

    fn on_miss(&mut self, _cards: [CardId; 2]) {}

    fn on_clear(&mut self) {}

    fn on_bgm_start(&mut self, _music: MusicSettings) {}

    fn on_bgm_stop(&mut self) {}

    fn on_reset(&mut self) {}

    /// Route an event to the matching hook.
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Flipped { card } => self.on_flip(card),
            GameEvent::Matched { image, cards } => self.on_match(image, cards),
            GameEvent::Missed { cards } => self.on_miss(cards),
            GameEvent::Cleared => self.on_clear(),
            GameEvent::MusicStarted(music) => self.on_bgm_start(music),
            GameEvent::MusicStopped => self.on_bgm_stop(),
            GameEvent::Reset => self.on_reset(),
        }
    }
}

/// Listener that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullListener;

impl GameListener for NullListener {}

impl<L: GameListener + ?Sized> GameListener for Box<L> {
    fn on_flip(&mut self, card: CardId) {
        (**self).on_flip(card);
    }

    fn on_match(&mut self, image: ImageRef, cards: [CardId; 2]) {
        (**self).on_match(image, cards);
    }

    fn on_miss(&mut self, cards: [CardId; 2]) {
        (**self).on_miss(cards);
    }

    fn on_clear(&mut self) {
        (**self).on_clear();
    }

    fn on_bgm_start(&mut self, music: MusicSettings) {
        (**self).on_bgm_start(music);
    }

    fn on_bgm_stop(&mut self) {
        (**self).on_bgm_stop();
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }

    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

impl<A: GameListener, B: GameListener> GameListener for (A, B) {
    fn on_flip(&mut self, card: CardId) {
        self.0.on_flip(card);
        self.1.on_flip(card);
    }

    fn on_match(&mut self, image: ImageRef, cards: [CardId; 2]) {
        self.0.on_match(image, cards);
        self.1.on_match(image, cards);
    }

    fn on_miss(&mut self, cards: [CardId; 2]) {
        self.0.on_miss(cards);
        self.1.on_miss(cards);
    }

    fn on_clear(&mut self) {
        self.0.on_clear();
        self.1.on_clear();
    }

    fn on_bgm_start(&mut self, music: MusicSettings) {
        self.0.on_bgm_start(music);
        self.1.on_bgm_start(music);
    }

    fn on_bgm_stop(&mut self) {
        self.0.on_bgm_stop();
        self.1.on_bgm_stop();
    }

    fn on_reset(&mut self) {
        self.0.on_reset();
        self.1.on_reset();
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

/// Listener that records every event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events with the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameListener for EventLog {
    fn on_flip(&mut self, card: CardId) {
        self.events.push(GameEvent::Flipped { card });
    }

    fn on_match(&mut self, image: ImageRef, cards: [CardId; 2]) {
        self.events.push(GameEvent::Matched { image, cards });
    }

    fn on_miss(&mut self, cards: [CardId; 2]) {
        self.events.push(GameEvent::Missed { cards });
    }

    fn on_clear(&mut self) {
        self.events.push(GameEvent::Cleared);
    }

    fn on_bgm_start(&mut self, music: MusicSettings) {
        self.events.push(GameEvent::MusicStarted(music));
    }

    fn on_bgm_stop(&mut self) {
        self.events.push(GameEvent::MusicStopped);
    }

    fn on_reset(&mut self) {
        self.events.push(GameEvent::Reset);
    }
}
