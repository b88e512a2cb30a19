//! Error types for the store layer.

use duet_model::{RoomCode, RoomId};

/// Errors from store-level invariant violations.
///
/// These cover only what the *tables* guarantee (index uniqueness,
/// referential integrity). Domain preconditions — readiness, lock state,
/// player counts — are checked by the operation layers above.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A room with this code already exists. The caller is expected to
    /// generate a fresh code and retry.
    #[error("room code {0} is already taken")]
    CodeTaken(RoomCode),

    /// A row referenced a room that doesn't exist.
    #[error("room {0} does not exist")]
    RoomMissing(RoomId),

    /// A round already exists at this (room, index) slot. At most one
    /// round per index — the unique composite index enforces it.
    #[error("round {1} already exists in room {0}")]
    DuplicateRound(RoomId, u32),
}
