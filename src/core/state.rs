//! Game state and published snapshots.
//!
//! ## GameState
//!
//! The aggregate the state machine owns:
//! - The dealt cards (fixed length for the whole game)
//! - The pending selection (at most two face-up, unresolved cards)
//! - The set of matched images
//! - The checking lock and completion flag
//!
//! ## GameSnapshot
//!
//! Read-only view handed to presentation code. Uses `im` persistent data
//! structures so publishing a snapshot after every transition is O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::StateError;
use crate::cards::{Card, CardId, ImageRef};

/// Cards revealed and not yet resolved. Never more than two.
pub type PendingSelection = SmallVec<[CardId; 2]>;

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    cards: Vector<Card>,
    pending: PendingSelection,
    matched_pairs: ImHashSet<ImageRef>,
    checking: bool,
    completed: bool,
    pair_count: usize,
    /// Deal counter, bumped on every rebuild of the deck.
    epoch: u64,
}

impl GameState {
    /// Create the state for a freshly dealt deck.
    #[must_use]
    pub fn new(cards: Vec<Card>, epoch: u64) -> Self {
        let pair_count = cards.len() / 2;
        Self {
            cards: cards.into_iter().collect(),
            pending: SmallVec::new(),
            matched_pairs: ImHashSet::new(),
            checking: false,
            completed: false,
            pair_count,
            epoch,
        }
    }

    // === Cards ===

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Get the card at a deck position.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // === Selection ===

    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub(crate) fn push_pending(&mut self, id: CardId) {
        self.pending.push(id);
    }

    /// Take the pending pair, leaving the selection empty.
    pub(crate) fn take_pending(&mut self) -> PendingSelection {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub(crate) fn set_checking(&mut self, checking: bool) {
        self.checking = checking;
    }

    // === Progress ===

    #[must_use]
    pub fn matched_pairs(&self) -> &ImHashSet<ImageRef> {
        &self.matched_pairs
    }

    /// Record a matched image. Returns false if it was already recorded.
    pub(crate) fn insert_matched_pair(&mut self, image: ImageRef) -> bool {
        self.matched_pairs.insert(image).is_none()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.matched_pairs.len()
    }

    #[must_use]
    pub fn pairs_remaining(&self) -> usize {
        self.pair_count.saturating_sub(self.matched_pairs.len())
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // === Invariants ===

    /// Check every structural invariant of the state.
    pub fn verify(&self) -> Result<(), StateError> {
        if self.pending.len() > 2 {
            return Err(StateError::PendingOverflow(self.pending.len()));
        }

        for &id in &self.pending {
            let Some(card) = self.cards.get(id.index()) else {
                continue;
            };
            if !card.is_face_up() {
                return Err(StateError::PendingFaceDown(id));
            }
            if card.is_matched() {
                return Err(StateError::PendingMatched(id));
            }
        }

        let mut matched_cards = 0;
        for card in &self.cards {
            if card.is_matched() {
                if !card.is_face_up() {
                    return Err(StateError::MatchedFaceDown(card.id()));
                }
                matched_cards += 1;
            }
        }

        if self.matched_pairs.len() * 2 != matched_cards {
            return Err(StateError::PairCountMismatch {
                pairs: self.matched_pairs.len(),
                matched_cards,
            });
        }

        if self.checking != (self.pending.len() == 2) {
            return Err(StateError::CheckingMismatch {
                checking: self.checking,
                pending: self.pending.len(),
            });
        }

        if self.completed != (self.matched_pairs.len() == self.pair_count) {
            return Err(StateError::CompletionMismatch {
                completed: self.completed,
                pairs: self.matched_pairs.len(),
                pair_count: self.pair_count,
            });
        }

        Ok(())
    }

    // === Snapshots ===

    /// Publish a read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cards: self.cards.clone(),
            pending: self.pending.clone(),
            matched_pairs: self.matched_pairs.clone(),
            checking: self.checking,
            completed: self.completed,
            pairs_found: self.pairs_found(),
            pairs_remaining: self.pairs_remaining(),
            epoch: self.epoch,
        }
    }
}

/// Immutable view of a `GameState` at one moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cards: Vector<Card>,
    pub pending: PendingSelection,
    pub matched_pairs: ImHashSet<ImageRef>,
    pub checking: bool,
    pub completed: bool,
    /// "Pairs found" counter.
    pub pairs_found: usize,
    /// "Pairs left" counter.
    pub pairs_remaining: usize,
    pub epoch: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::layout_deck;

    fn two_pair_state() -> GameState {
        let pool = [ImageRef::new(1), ImageRef::new(2)];
        let deck = layout_deck(&pool, &[pool[0], pool[1], pool[0], pool[1]]).unwrap();
        GameState::new(deck, 0)
    }

    #[test]
    fn test_new_state() {
        let state = two_pair_state();

        assert_eq!(state.card_count(), 4);
        assert_eq!(state.pair_count(), 2);
        assert_eq!(state.pairs_found(), 0);
        assert_eq!(state.pairs_remaining(), 2);
        assert!(state.pending().is_empty());
        assert!(!state.is_checking());
        assert!(!state.is_completed());
        assert_eq!(state.verify(), Ok(()));
    }

    #[test]
    fn test_verify_matched_face_down() {
        let mut state = two_pair_state();
        state.card_mut(CardId::new(0)).unwrap().matched = true;

        assert_eq!(state.verify(), Err(StateError::MatchedFaceDown(CardId::new(0))));
    }

    #[test]
    fn test_verify_pair_count() {
        let mut state = two_pair_state();
        state.insert_matched_pair(ImageRef::new(1));

        assert_eq!(
            state.verify(),
            Err(StateError::PairCountMismatch { pairs: 1, matched_cards: 0 })
        );
    }

    #[test]
    fn test_verify_checking_lock() {
        let mut state = two_pair_state();
        state.card_mut(CardId::new(0)).unwrap().face_up = true;
        state.push_pending(CardId::new(0));
        assert_eq!(state.verify(), Ok(()));

        state.set_checking(true);
        assert_eq!(
            state.verify(),
            Err(StateError::CheckingMismatch { checking: true, pending: 1 })
        );
    }

    #[test]
    fn test_take_pending() {
        let mut state = two_pair_state();
        state.push_pending(CardId::new(0));
        state.push_pending(CardId::new(2));

        let pending = state.take_pending();
        assert_eq!(pending.as_slice(), &[CardId::new(0), CardId::new(2)]);
        assert!(state.pending().is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = two_pair_state();
        let before = state.snapshot();

        state.card_mut(CardId::new(1)).unwrap().face_up = true;

        assert!(!before.cards[1].is_face_up());
        assert!(state.snapshot().cards[1].is_face_up());
        assert_eq!(before.pairs_remaining, 2);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = two_pair_state().snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
