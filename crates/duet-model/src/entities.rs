//! The three persisted entities: rooms, players, rounds.
//!
//! These are plain data rows. Construction and mutation happen in
//! `duet-store` and the operation crates; nothing here enforces sequencing
//! on its own. Ownership is by back-reference: players and rounds point at
//! their room via `room_id`, the room holds no collections.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{OptionId, PlayerId, QuestionId, RoomCode, RoomId, RoomStatus, RoundId};

/// How often an active client should call `heartbeat`.
///
/// A policy constant consumed by the presentation layer — the core never
/// runs a timer itself.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

/// How long after the last heartbeat a player still counts as online.
///
/// Presence is derived on read from `last_seen`; no player is ever
/// force-removed for going stale.
pub const PRESENCE_TIMEOUT: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// One game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Shareable join code. Globally unique, immutable after creation.
    pub code: RoomCode,
    /// Lifecycle state. Only ever moves forward (see [`RoomStatus`]).
    pub status: RoomStatus,
    /// Opaque question-set identifier, fixed at creation and echoed at
    /// game start.
    pub deck_id: String,
    /// Number of rounds in a full game, fixed at creation.
    pub total_rounds: u32,
    /// Creation time, epoch milliseconds.
    pub created_at: u64,
    /// The player who created the room. Bound during `create_room`, right
    /// after the host's player row exists.
    pub host_id: PlayerId,
    /// Index of the round currently being played. Meaningful only once the
    /// room is in progress; strictly increases by 1 per advance.
    pub current_round_index: u32,
    /// Ordered question ids chosen at game start. Empty in the lobby,
    /// length == `total_rounds` afterwards.
    pub question_sequence: Vec<QuestionId>,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One participant. A room owns at most two at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Back-reference to the owning room.
    pub room_id: RoomId,
    /// Display name, unique within the room.
    pub name: String,
    /// Small display token (an emoji in practice). Opaque to the core.
    pub avatar: String,
    /// Lobby readiness flag.
    pub ready: bool,
    /// Last heartbeat, epoch milliseconds.
    pub last_seen: u64,
}

impl Player {
    /// Derived presence: online iff the last heartbeat is within
    /// [`PRESENCE_TIMEOUT`] of `now_ms`.
    ///
    /// Pure function of stored data and the caller's clock — staleness is
    /// only ever observed on read, never enforced.
    pub fn is_online(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_seen) <= PRESENCE_TIMEOUT.as_millis() as u64
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

/// One question-and-answer cycle within a room.
///
/// Created lazily, one at a time; historical rounds persist for scoring.
/// Once `revealed` is true the row is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// Back-reference to the owning room.
    pub room_id: RoomId,
    /// Position in the room's question sequence (0-based).
    pub round_index: u32,
    pub question_id: QuestionId,
    /// Which players have submitted. `locked[p]` implies `answers[p]`
    /// is present.
    pub locked: HashMap<PlayerId, bool>,
    /// Each player's chosen option. Overwritable until reveal.
    pub answers: HashMap<PlayerId, OptionId>,
    /// 1 if both players picked the same option, else 0. Valid only after
    /// reveal.
    pub score_delta: u32,
    pub revealed: bool,
}

impl Round {
    /// Returns `true` if this player has locked an answer.
    pub fn has_locked(&self, player: PlayerId) -> bool {
        self.locked.get(&player).copied().unwrap_or(false)
    }

    /// Derived "revealable" check: both players have locked.
    ///
    /// Computed from the lock map on every read — deliberately not stored,
    /// so it can never desync from the map.
    pub fn both_locked(&self, a: PlayerId, b: PlayerId) -> bool {
        self.has_locked(a) && self.has_locked(b)
    }
}
