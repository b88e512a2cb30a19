//! The round engine and scoring aggregator for Duet.
//!
//! This crate owns the per-round state machine:
//!
//! ```text
//! unlocked ──both players locked──▶ revealable ──reveal──▶ revealed
//! ```
//!
//! "Revealable" is advisory — derived from the lock map, never stored.
//! "Revealed" is terminal: the round's answers and score delta freeze the
//! moment [`reveal_round`] decides the outcome, and that decision happens
//! exactly once per round. [`advance_round`] then moves the room forward
//! (or finishes the game), and is safe to call redundantly from both
//! clients' timers — duplicate calls are no-ops.
//!
//! Scoring ([`total_score`], [`match_percentage`], [`match_message`]) is
//! pure: a fold over the revealed round history.

mod engine;
mod error;
mod scoring;

pub use engine::{
    advance_round, all_rounds, current_round, lock_answer, reveal_round, Advance,
};
pub use error::RoundError;
pub use scoring::{match_message, match_percentage, total_score};
