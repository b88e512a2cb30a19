//! The room lifecycle state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lifecycle state of a room.
///
/// Transitions are strictly forward — no skipping, no going back:
///
/// ```text
/// Lobby → InProgress → Finished
/// ```
///
/// - **Lobby**: room exists, players can join and toggle readiness.
/// - **InProgress**: the game started; the question sequence is fixed and
///   rounds are being played. No further joins.
/// - **Finished**: the last round was played out. Terminal — players can
///   read the results but nothing mutates anymore.
///
/// Serializes to the wire strings `"lobby"` / `"in_progress"` /
/// `"finished"` consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Lobby,
    InProgress,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if a game is actively being played.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// The next state in the strict forward order, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Lobby => Some(Self::InProgress),
            Self::InProgress => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "lobby"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Finished => write!(f, "finished"),
        }
    }
}
