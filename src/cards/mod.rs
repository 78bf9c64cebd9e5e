//! Card system: image identities, the image pool, cards and deck building.
//!
//! ## Key Types
//!
//! - `ImageRef`: Identity of a source photo (never compared by content)
//! - `ImagePool`: Bounded ingestion buffer fed by picker and camera
//! - `CardId`: Position of a card in the dealt deck
//! - `Card`: A dealt card with its face-up/matched flags
//! - `build_deck`: Doubles and shuffles a pool into a deck

pub mod card;
pub mod deck;
pub mod image;

pub use card::{Card, CardFace, CardId};
pub use deck::{build_deck, layout_deck, validate_pool};
pub use image::{ImagePool, ImageRef};
