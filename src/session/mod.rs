//! Session: the serialized execution context around a game.
//!
//! ## Key Types
//!
//! - `Session`: Owns pool, game, command queue and scheduler
//! - `Command`: Session commands as data
//! - `Scheduler`: Virtual-clock queue for delayed pair resolution
//! - `Phase`: Photo selection or play

pub mod command;
pub mod runner;
pub mod scheduler;

pub use command::Command;
pub use runner::{Phase, Session};
pub use scheduler::Scheduler;
