//! Session commands.
//!
//! Everything the presentation adapter can ask of a session, as data.
//! Commands are queued and applied one at a time, in submission order.

use serde::{Deserialize, Serialize};

use crate::cards::ImageRef;

/// A request from the outside world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Images returned by the library picker.
    AddPicked(Vec<ImageRef>),
    /// One image returned by the camera.
    AddCaptured(ImageRef),
    /// Drop a photo from the pool before starting.
    RemovePhoto(usize),
    /// Deal a game from the full pool.
    StartGame,
    /// Reveal the card at a deck position.
    SelectCard(usize),
    /// Deal again from the same pool.
    Reset,
    /// Abandon the game and the pool; back to photo selection.
    ChangePhotos,
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPicked(_) => "add_picked",
            Command::AddCaptured(_) => "add_captured",
            Command::RemovePhoto(_) => "remove_photo",
            Command::StartGame => "start_game",
            Command::SelectCard(_) => "select_card",
            Command::Reset => "reset",
            Command::ChangePhotos => "change_photos",
        }
    }
}
