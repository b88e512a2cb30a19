//! Error types for the round engine.

use duet_model::{PlayerId, RoomId, RoomStatus};
use duet_store::StoreError;

/// Errors from round operations.
///
/// Racing clients routinely hit [`AlreadyRevealed`](Self::AlreadyRevealed):
/// when both players' timers fire a reveal at once, one wins and the other
/// gets this benign error with nothing mutated.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    /// The room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// No round exists at this (room, index) slot.
    #[error("round {1} not found in room {0}")]
    RoundNotFound(RoomId, u32),

    /// The player does not exist.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// The player exists but belongs to a different room.
    #[error("player {0} is not in room {1}")]
    PlayerNotInRoom(PlayerId, RoomId),

    /// The round was already revealed — its answers and score are frozen.
    #[error("round {1} in room {0} is already revealed")]
    AlreadyRevealed(RoomId, u32),

    /// Both players must lock before a reveal; this one hasn't.
    #[error("player {0} has not locked an answer")]
    NotLocked(PlayerId),

    /// Rounds can only move while a game is in progress.
    #[error("room is not in progress (status: {0})")]
    NotInProgress(RoomStatus),

    /// A store-level invariant failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
