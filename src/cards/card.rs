//! Cards on the table.
//!
//! A `Card` is one of the 2N tiles dealt for a game. Its identity (`id`)
//! and hidden face (`image`) never change after the deal; only the
//! `face_up` and `matched` flags move, and only through the state machine.

use serde::{Deserialize, Serialize};

use super::image::ImageRef;

/// Position of a card in the dealt deck (0..2N).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of the card in the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Observable state of a single card.
///
/// ```text
/// FaceDown --select--> Pending --match--> Matched (terminal)
///                         |
///                         +--miss--> FaceDown
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Hidden, selectable.
    FaceDown,
    /// Revealed and waiting for resolution.
    Pending,
    /// Revealed for good.
    Matched,
}

/// A dealt card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    image: ImageRef,
    pub(crate) face_up: bool,
    pub(crate) matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, image: ImageRef) -> Self {
        Self {
            id,
            image,
            face_up: false,
            matched: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The hidden face of this card.
    #[must_use]
    pub fn image(&self) -> ImageRef {
        self.image
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Can this card be picked right now (ignoring the checking lock)?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.face_up && !self.matched
    }

    #[must_use]
    pub fn face(&self) -> CardFace {
        match (self.face_up, self.matched) {
            (_, true) => CardFace::Matched,
            (true, false) => CardFace::Pending,
            (false, false) => CardFace::FaceDown,
        }
    }
}
