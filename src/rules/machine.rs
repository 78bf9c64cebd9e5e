//! The game state machine.
//!
//! `GameMachine` owns the `GameState` of one game and is the only thing
//! that mutates it. It exposes two player operations:
//!
//! - `select_card(index)`: reveal a card; the second reveal locks input
//!   and hands a `ResolutionTicket` to the caller
//! - `reset()`: deal a new deck from the same pool
//!
//! ## Deferred resolution
//!
//! The machine does not own a clock. A revealed pair is resolved when the
//! caller presents the ticket back through `resolve(ticket)`, normally
//! after the configured delay (see `session::Session`). Each ticket
//! carries the deal epoch it was issued in, so a ticket that outlives a
//! reset is discarded instead of resolving cards of the new deck.

use serde::{Deserialize, Serialize};

use super::evaluator::{resolve_pair, MatchOutcome};
use crate::cards::{build_deck, layout_deck, validate_pool, Card, CardId, ImageRef};
use crate::core::{GameConfig, GameError, GameRng, GameSnapshot, GameState, SelectError};
use crate::events::{GameEvent, GameListener, MusicSettings, NullListener};

/// Hand-off from a completed pair selection to the match evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    epoch: u64,
    cards: [CardId; 2],
}

impl ResolutionTicket {
    /// Deal epoch the ticket was issued in.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The revealed pair, in selection order.
    #[must_use]
    pub fn cards(&self) -> [CardId; 2] {
        self.cards
    }
}

/// Result of `select_card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored,
    /// First card of a pair revealed.
    Flipped(CardId),
    /// Second card revealed; input is locked until the ticket resolves.
    PairPending(ResolutionTicket),
}

/// State machine for one game of concentration.
pub struct GameMachine<L = NullListener> {
    config: GameConfig,
    pool: Vec<ImageRef>,
    state: GameState,
    rng: GameRng,
    listener: L,
}

impl<L: GameListener> GameMachine<L> {
    /// Deal a shuffled deck from `pool`.
    ///
    /// The pool must hold exactly `config.pair_count` distinct images.
    pub fn new(config: GameConfig, pool: &[ImageRef], listener: L) -> Result<Self, GameError> {
        let mut rng = GameRng::from_seed_or_entropy(config.seed);
        let deck = build_deck(pool, config.pair_count, &mut rng)?;
        tracing::info!(seed = rng.seed(), pairs = config.pair_count, "Dealt new deck");

        Ok(Self {
            config,
            pool: pool.to_vec(),
            state: GameState::new(deck, 0),
            rng,
            listener,
        })
    }

    /// Deal `layout` as-is instead of shuffling.
    ///
    /// Later resets shuffle normally.
    pub fn with_layout(
        config: GameConfig,
        pool: &[ImageRef],
        layout: &[ImageRef],
        listener: L,
    ) -> Result<Self, GameError> {
        validate_pool(pool, config.pair_count)?;
        let deck = layout_deck(pool, layout)?;

        Ok(Self {
            rng: GameRng::from_seed_or_entropy(config.seed),
            config,
            pool: pool.to_vec(),
            state: GameState::new(deck, 0),
            listener,
        })
    }

    /// Begin play: cue the background music.
    pub fn start(&mut self) {
        let music = MusicSettings::from_config(&self.config);
        self.emit(GameEvent::MusicStarted(music));
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Images this game was dealt from.
    #[must_use]
    pub fn pool(&self) -> &[ImageRef] {
        &self.pool
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.state.card(index)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.state.epoch()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    // === Selection ===

    /// Reveal the card at `index`.
    ///
    /// Out-of-range, matched and face-up cards are ignored, and so is
    /// everything while a pair is being checked.
    pub fn select_card(&mut self, index: usize) -> SelectOutcome {
        match self.try_select_card(index) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(%err, index, "Ignored card selection");
                SelectOutcome::Ignored
            }
        }
    }

    /// Same as `select_card`, but reports why a selection was ignored.
    pub fn try_select_card(&mut self, index: usize) -> Result<SelectOutcome, SelectError> {
        let card = self.state.card(index).ok_or(SelectError::OutOfBounds {
            index,
            len: self.state.card_count(),
        })?;
        let id = card.id();

        if !card.is_selectable() {
            return Err(if card.is_matched() {
                SelectError::AlreadyMatched(id)
            } else {
                SelectError::AlreadyFaceUp(id)
            });
        }
        if self.state.is_checking() {
            return Err(SelectError::Checking);
        }

        if let Some(card) = self.state.card_mut(id) {
            card.face_up = true;
        }
        self.state.push_pending(id);
        self.emit(GameEvent::Flipped { card: id });

        let pair = match *self.state.pending() {
            [first, second] => Some([first, second]),
            _ => None,
        };
        let outcome = match pair {
            Some(cards) => {
                self.state.set_checking(true);
                SelectOutcome::PairPending(ResolutionTicket {
                    epoch: self.state.epoch(),
                    cards,
                })
            }
            None => SelectOutcome::Flipped(id),
        };

        self.debug_verify();
        Ok(outcome)
    }

    // === Resolution ===

    /// Resolve the pair a ticket was issued for.
    ///
    /// Returns `None` if the ticket is stale: issued before a reset, or
    /// for a pair that is no longer pending.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> Option<MatchOutcome> {
        if ticket.epoch != self.state.epoch() || self.state.pending() != ticket.cards {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.state.epoch(),
                "Discarded stale resolution"
            );
            return None;
        }
        self.resolve_pending()
    }

    /// Resolve whatever pair is pending right now, skipping the delay.
    pub fn resolve_pending(&mut self) -> Option<MatchOutcome> {
        let outcome = resolve_pair(&mut self.state, &self.pool, &mut self.listener)?;

        if let MatchOutcome::Matched { completed: true, .. } = outcome {
            tracing::info!(pairs = self.state.pairs_found(), "All pairs found");
        }

        self.debug_verify();
        Some(outcome)
    }

    // === Reset ===

    /// Deal a new deck from the same pool and start over.
    ///
    /// Any outstanding `ResolutionTicket` becomes stale.
    pub fn reset(&mut self) {
        let deck = match build_deck(&self.pool, self.config.pair_count, &mut self.rng) {
            Ok(deck) => deck,
            Err(err) => {
                tracing::warn!(%err, "Failed to deal a new deck");
                return;
            }
        };

        let epoch = self.state.epoch() + 1;
        self.state = GameState::new(deck, epoch);
        tracing::info!(epoch, "Game reset");

        self.emit(GameEvent::Reset);
        self.emit(GameEvent::MusicStopped);
    }

    fn emit(&mut self, event: GameEvent) {
        tracing::trace!(event = event.name(), "Game event");
        self.listener.on_event(&event);
    }

    /// Debug builds re-check every invariant after a transition and report
    /// a break without stopping the game.
    fn debug_verify(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.state.verify() {
                tracing::error!(%err, epoch = self.state.epoch(), "Game state invariant broken");
            }
        }
    }
}

impl<L> std::fmt::Debug for GameMachine<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameMachine")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;

    fn pool() -> Vec<ImageRef> {
        (0..8).map(ImageRef::new).collect()
    }

    fn machine(seed: u64) -> GameMachine<EventLog> {
        let config = GameConfig::default().with_seed(seed);
        GameMachine::new(config, &pool(), EventLog::new()).unwrap()
    }

    /// Deck positions of both cards for every image.
    fn pairs(machine: &GameMachine<EventLog>) -> Vec<(usize, usize)> {
        machine
            .pool()
            .iter()
            .map(|&image| {
                let mut positions = machine
                    .state()
                    .cards()
                    .iter()
                    .filter(|c| c.image() == image)
                    .map(|c| c.id().index());
                (positions.next().unwrap(), positions.next().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_short_pool() {
        let config = GameConfig::default();
        let short: Vec<_> = (0..5).map(ImageRef::new).collect();

        let result = GameMachine::new(config, &short, NullListener);

        assert_eq!(result.err(), Some(GameError::PoolSize { expected: 8, actual: 5 }));
    }

    #[test]
    fn test_start_cues_music() {
        let mut m = machine(1);
        m.start();

        assert_eq!(
            m.listener().events(),
            &[GameEvent::MusicStarted(MusicSettings { looping: true, volume: 0.5 })]
        );
    }

    #[test]
    fn test_first_selection_flips() {
        let mut m = machine(1);

        assert_eq!(m.select_card(3), SelectOutcome::Flipped(CardId::new(3)));
        assert!(m.card(3).unwrap().is_face_up());
        assert_eq!(m.state().pending(), &[CardId::new(3)]);
        assert!(!m.state().is_checking());
        assert_eq!(m.listener().count("flip"), 1);
    }

    #[test]
    fn test_second_selection_locks() {
        let mut m = machine(1);
        m.select_card(0);

        let outcome = m.select_card(1);

        let SelectOutcome::PairPending(ticket) = outcome else {
            panic!("expected a pending pair, got {outcome:?}");
        };
        assert_eq!(ticket.cards(), [CardId::new(0), CardId::new(1)]);
        assert_eq!(ticket.epoch(), 0);
        assert!(m.state().is_checking());
        assert_eq!(m.try_select_card(2), Err(SelectError::Checking));
        assert!(!m.card(2).unwrap().is_face_up());
    }

    #[test]
    fn test_rejections() {
        let mut m = machine(1);
        m.select_card(0);

        assert_eq!(
            m.try_select_card(16),
            Err(SelectError::OutOfBounds { index: 16, len: 16 })
        );
        assert_eq!(m.try_select_card(0), Err(SelectError::AlreadyFaceUp(CardId::new(0))));
        assert_eq!(m.select_card(0), SelectOutcome::Ignored);
        assert_eq!(m.listener().count("flip"), 1);
    }

    #[test]
    fn test_resolve_with_ticket() {
        let mut m = machine(9);
        let (a, b) = pairs(&m)[0];
        m.select_card(a);
        let SelectOutcome::PairPending(ticket) = m.select_card(b) else {
            panic!("expected a pending pair");
        };

        let outcome = m.resolve(ticket).unwrap();

        assert!(outcome.is_match());
        assert_eq!(m.state().pairs_found(), 1);
        assert!(!m.state().is_checking());
        assert_eq!(m.try_select_card(a), Err(SelectError::AlreadyMatched(CardId::new(a as u32))));

        // A ticket is good for one resolution only
        assert_eq!(m.resolve(ticket), None);
    }

    #[test]
    fn test_reset_invalidates_ticket() {
        let mut m = machine(4);
        m.select_card(0);
        let SelectOutcome::PairPending(ticket) = m.select_card(1) else {
            panic!("expected a pending pair");
        };

        m.reset();

        assert_eq!(m.epoch(), 1);
        assert_eq!(m.resolve(ticket), None);
        assert!(m.state().pending().is_empty());
        assert!(!m.state().is_checking());
        assert!(m.state().cards().iter().all(|c| !c.is_face_up()));

        let names: Vec<_> = m.listener().events().iter().map(GameEvent::name).collect();
        assert_eq!(names, vec!["flip", "flip", "reset", "bgm_stop"]);
    }

    #[test]
    fn test_reset_reshuffles() {
        let mut m = machine(4);
        let before: Vec<_> = m.state().cards().iter().map(Card::image).collect();

        m.reset();

        let after: Vec<_> = m.state().cards().iter().map(Card::image).collect();
        assert_ne!(before, after);
        assert_eq!(m.pool(), pool().as_slice());
    }

    #[test]
    fn test_broken_invariant_is_reported_not_fatal() {
        let mut m = machine(6);
        m.state.mark_completed();
        assert!(m.state().verify().is_err());

        assert!(matches!(m.select_card(0), SelectOutcome::Flipped(_)));
        assert_eq!(m.listener().count("flip"), 1);
    }

    #[test]
    fn test_full_game() {
        let mut m = machine(12);

        for (i, (a, b)) in pairs(&m).into_iter().enumerate() {
            assert!(!m.is_completed());
            m.select_card(a);
            m.select_card(b);
            let outcome = m.resolve_pending().unwrap();
            assert_eq!(
                outcome,
                MatchOutcome::Matched {
                    image: m.card(a).unwrap().image(),
                    cards: [CardId::new(a as u32), CardId::new(b as u32)],
                    completed: i == 7,
                }
            );
        }

        assert!(m.is_completed());
        assert_eq!(m.state().pairs_remaining(), 0);
        assert_eq!(m.listener().count("clear"), 1);
        assert_eq!(m.listener().count("bgm_stop"), 1);
    }
}
