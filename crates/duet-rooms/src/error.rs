//! Error types for the room layer.

use duet_model::{PlayerId, RoomCode, RoomId, RoomStatus};
use duet_store::StoreError;

/// Errors from room lifecycle and registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// No room has this join code.
    #[error("no room with code {0}")]
    CodeNotFound(RoomCode),

    /// The player does not exist.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// The operation requires a room still in the lobby — it was attempted
    /// after the game started (or finished).
    #[error("room is not in the lobby (status: {0})")]
    NotInLobby(RoomStatus),

    /// Both player slots are taken.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// Another player in this room already uses this display name.
    #[error("name {0:?} is already taken in this room")]
    NameTaken(String),

    /// Starting a game requires exactly two players.
    #[error("need exactly 2 players to start, have {have}")]
    NotEnoughPlayers { have: usize },

    /// Starting a game requires every player to be ready.
    #[error("all players must be ready to start")]
    PlayersNotReady,

    /// The question sequence doesn't match the room's fixed round count.
    #[error("need exactly {expected} question ids, got {got}")]
    WrongQuestionCount { expected: u32, got: usize },

    /// Code generation kept colliding with existing rooms. With a 36^6
    /// keyspace this is practically unreachable; the bound exists so that
    /// `create_room` always terminates.
    #[error("could not generate an unused room code")]
    CodeSpaceExhausted,

    /// A store-level invariant failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
