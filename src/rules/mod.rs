//! Game rules: card selection, match evaluation and reset.
//!
//! - `GameMachine`: owns the state of one game and applies player input
//! - `resolve_pair`: the match evaluator run on a revealed pair
//!
//! Neither knows about time. Scheduling the delayed evaluation is the
//! session's job.

pub mod evaluator;
pub mod machine;

pub use evaluator::{resolve_pair, MatchOutcome};
pub use machine::{GameMachine, ResolutionTicket, SelectOutcome};
