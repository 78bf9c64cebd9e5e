//! Error types.
//!
//! None of these ever reach the player as a failure. The public surface
//! degrades to a no-op on invalid input; the typed errors exist so callers
//! and tests can see *why* something was ignored.

use thiserror::Error;

use crate::cards::{CardId, ImageRef};

/// Deck construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game needs at least one pair")]
    NoPairs,

    #[error("image pool has {actual} images, {expected} required")]
    PoolSize { expected: usize, actual: usize },

    #[error("{0} appears more than once in the image pool")]
    DuplicateImage(ImageRef),

    #[error("deck layout has {actual} cards, {expected} required")]
    LayoutSize { expected: usize, actual: usize },

    #[error("{0} is not part of the image pool")]
    UnknownImage(ImageRef),

    #[error("{image} appears {count} times in the deck layout, expected 2")]
    LayoutPairCount { image: ImageRef, count: usize },
}

/// Reasons a card selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("card index {index} out of bounds for {len} cards")]
    OutOfBounds { index: usize, len: usize },

    #[error("{0} is already matched")]
    AlreadyMatched(CardId),

    #[error("{0} is already face-up")]
    AlreadyFaceUp(CardId),

    #[error("a revealed pair is still being checked")]
    Checking,
}

/// Image pool ingestion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("image pool is full ({capacity} images)")]
    Full { capacity: usize },

    #[error("{0} is already in the image pool")]
    Duplicate(ImageRef),

    #[error("no image at pool position {0}")]
    NoSuchPosition(usize),
}

/// Session command failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no game is in progress")]
    NotPlaying,

    #[error("a game is already in progress")]
    AlreadyPlaying,

    #[error("image pool has {have} of {need} images")]
    PoolIncomplete { have: usize, need: usize },

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Broken `GameState` invariants. Seeing one of these is a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{0} cards pending, at most 2 allowed")]
    PendingOverflow(usize),

    #[error("pending {0} is not face-up")]
    PendingFaceDown(CardId),

    #[error("pending {0} is already matched")]
    PendingMatched(CardId),

    #[error("{0} is matched but face-down")]
    MatchedFaceDown(CardId),

    #[error("{pairs} matched pairs but {matched_cards} matched cards")]
    PairCountMismatch { pairs: usize, matched_cards: usize },

    #[error("checking flag is {checking} with {pending} pending cards")]
    CheckingMismatch { checking: bool, pending: usize },

    #[error("completed flag is {completed} with {pairs} of {pair_count} pairs")]
    CompletionMismatch {
        completed: bool,
        pairs: usize,
        pair_count: usize,
    },
}
