//! Match evaluation.
//!
//! Runs once a revealed pair has been visible for the resolution delay.
//! Images are compared by identity, and an image must still belong to the
//! game's pool to count; anything else resolves as a miss.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, ImageRef};
use crate::core::GameState;
use crate::events::{GameEvent, GameListener};

/// Result of resolving a revealed pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Both cards showed `image`; they stay face-up for good.
    Matched {
        image: ImageRef,
        cards: [CardId; 2],
        /// This was the last pair.
        completed: bool,
    },
    /// The cards differed and were turned face-down again.
    Missed { cards: [CardId; 2] },
}

impl MatchOutcome {
    #[must_use]
    pub fn cards(&self) -> [CardId; 2] {
        match *self {
            MatchOutcome::Matched { cards, .. } | MatchOutcome::Missed { cards } => cards,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// Resolve the pending pair in `state`.
///
/// Returns `None` without touching anything unless exactly two cards are
/// pending. Always leaves the selection empty and the checking lock
/// released.
pub fn resolve_pair<L: GameListener + ?Sized>(
    state: &mut GameState,
    pool: &[ImageRef],
    listener: &mut L,
) -> Option<MatchOutcome> {
    if state.pending().len() != 2 {
        return None;
    }

    let pending = state.take_pending();
    let cards = [pending[0], pending[1]];

    let first = state.card(cards[0].index()).map(|c| c.image());
    let second = state.card(cards[1].index()).map(|c| c.image());

    let outcome = match (first, second) {
        (Some(a), Some(b)) if a == b && pool.contains(&a) => {
            apply_match(state, a, cards, listener)
        }
        _ => apply_miss(state, cards, listener),
    };

    state.set_checking(false);
    Some(outcome)
}

fn apply_match<L: GameListener + ?Sized>(
    state: &mut GameState,
    image: ImageRef,
    cards: [CardId; 2],
    listener: &mut L,
) -> MatchOutcome {
    for id in cards {
        if let Some(card) = state.card_mut(id) {
            card.face_up = true;
            card.matched = true;
        }
    }
    state.insert_matched_pair(image);
    listener.on_event(&GameEvent::Matched { image, cards });

    let completed = state.pairs_found() == state.pair_count();
    if completed {
        state.mark_completed();
        listener.on_event(&GameEvent::Cleared);
        listener.on_event(&GameEvent::MusicStopped);
    }

    MatchOutcome::Matched {
        image,
        cards,
        completed,
    }
}

fn apply_miss<L: GameListener + ?Sized>(
    state: &mut GameState,
    cards: [CardId; 2],
    listener: &mut L,
) -> MatchOutcome {
    for id in cards {
        if let Some(card) = state.card_mut(id) {
            card.face_up = false;
        }
    }
    listener.on_event(&GameEvent::Missed { cards });

    MatchOutcome::Missed { cards }
}
