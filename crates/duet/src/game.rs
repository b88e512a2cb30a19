//! The `Game` facade: one handle, every core operation, each one atomic.

use std::sync::Arc;

use duet_model::{OptionId, Player, PlayerId, QuestionId, RoomCode, RoomId, Round};
use duet_rooms::{self as rooms, CreatedRoom, JoinedRoom, RoomError, RoomSnapshot};
use duet_rounds::{self as rounds, Advance};
use duet_store::Store;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::DuetError;

/// Derived end-of-game read model: cumulative score, compatibility
/// percentage, and the banded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u32,
    pub percentage: u32,
    pub message: String,
}

/// A handle to one server's worth of game sessions.
///
/// Cheap to clone — clones share the same authoritative store. Give every
/// connection handler its own clone; all coordination between the two
/// players' clients is mediated here.
///
/// # Atomicity
///
/// Every method acquires the store mutex once, runs one check-then-act
/// unit against the tables, and releases. No other mutation can interleave
/// between a guard check and its effect, which is what makes the
/// `start_game` / `reveal_round` / `advance_round` guards race-proof: of
/// two racing calls, exactly one observes the old state and mutates, the
/// other observes the result. No caller ever holds the lock across
/// multiple operations.
#[derive(Clone)]
pub struct Game {
    store: Arc<Mutex<Store>>,
}

impl Game {
    /// Creates a handle with a fresh, empty store.
    pub fn new() -> Self {
        tracing::debug!("fresh game store created");
        Self {
            store: Arc::new(Mutex::new(Store::new())),
        }
    }

    // -- Lifecycle --------------------------------------------------------

    /// Creates a room in the lobby with its host player. See
    /// [`duet_rooms::create_room`].
    pub async fn create_room(
        &self,
        host_name: &str,
        host_avatar: &str,
    ) -> Result<CreatedRoom, DuetError> {
        let mut store = self.store.lock().await;
        Ok(rooms::create_room(&mut store, host_name, host_avatar)?)
    }

    /// Read-only composite fetch: room plus players, by join code.
    pub async fn room_by_code(&self, code: &RoomCode) -> Option<RoomSnapshot> {
        let store = self.store.lock().await;
        rooms::room_by_code(&store, code)
    }

    /// Starts the game once both players are ready. See
    /// [`duet_rooms::start_game`].
    pub async fn start_game(
        &self,
        room_id: RoomId,
        deck_id: &str,
        question_ids: Vec<QuestionId>,
    ) -> Result<(), DuetError> {
        let mut store = self.store.lock().await;
        Ok(rooms::start_game(&mut store, room_id, deck_id, question_ids)?)
    }

    // -- Registry ---------------------------------------------------------

    /// Joins a lobby by code. See [`duet_rooms::join_room`].
    pub async fn join_room(
        &self,
        code: &RoomCode,
        name: &str,
        avatar: &str,
    ) -> Result<JoinedRoom, DuetError> {
        let mut store = self.store.lock().await;
        Ok(rooms::join_room(&mut store, code, name, avatar)?)
    }

    /// Sets a player's readiness flag (last write wins).
    pub async fn set_ready(
        &self,
        player_id: PlayerId,
        ready: bool,
    ) -> Result<(), DuetError> {
        let mut store = self.store.lock().await;
        Ok(rooms::set_ready(&mut store, player_id, ready)?)
    }

    /// Records a liveness heartbeat for a player.
    pub async fn heartbeat(&self, player_id: PlayerId) -> Result<(), DuetError> {
        let mut store = self.store.lock().await;
        Ok(rooms::heartbeat(&mut store, player_id)?)
    }

    /// All players in a room, in join order.
    pub async fn players(&self, room_id: RoomId) -> Vec<Player> {
        let store = self.store.lock().await;
        rooms::players_in_room(&store, room_id)
    }

    // -- Rounds -----------------------------------------------------------

    /// The round at this index, if it exists yet.
    pub async fn current_round(
        &self,
        room_id: RoomId,
        round_index: u32,
    ) -> Option<Round> {
        let store = self.store.lock().await;
        rounds::current_round(&store, room_id, round_index)
    }

    /// The room's full round history, ordered by index.
    pub async fn all_rounds(&self, room_id: RoomId) -> Vec<Round> {
        let store = self.store.lock().await;
        rounds::all_rounds(&store, room_id)
    }

    /// Locks (or re-locks) a player's answer. See
    /// [`duet_rounds::lock_answer`].
    pub async fn lock_answer(
        &self,
        room_id: RoomId,
        round_index: u32,
        player_id: PlayerId,
        option_id: OptionId,
    ) -> Result<(), DuetError> {
        let mut store = self.store.lock().await;
        Ok(rounds::lock_answer(
            &mut store,
            room_id,
            round_index,
            player_id,
            option_id,
        )?)
    }

    /// Reveals a round, deciding and returning its score delta exactly
    /// once. See [`duet_rounds::reveal_round`].
    pub async fn reveal_round(
        &self,
        room_id: RoomId,
        round_index: u32,
        player_a: PlayerId,
        player_b: PlayerId,
    ) -> Result<u32, DuetError> {
        let mut store = self.store.lock().await;
        Ok(rounds::reveal_round(
            &mut store, room_id, round_index, player_a, player_b,
        )?)
    }

    /// Advances past a revealed round, or finishes the game. Duplicate
    /// calls are no-ops. See [`duet_rounds::advance_round`].
    pub async fn advance_round(&self, room_id: RoomId) -> Result<Advance, DuetError> {
        let mut store = self.store.lock().await;
        Ok(rounds::advance_round(&mut store, room_id)?)
    }

    // -- Scoring ----------------------------------------------------------

    /// Derives the cumulative score, match percentage, and banded message
    /// from the room's revealed round history.
    pub async fn score_summary(&self, room_id: RoomId) -> Result<ScoreSummary, DuetError> {
        let store = self.store.lock().await;
        let room = store
            .room(room_id)
            .ok_or(RoomError::RoomNotFound(room_id))?;
        let total_rounds = room.total_rounds;

        let history = store.rounds_in(room_id);
        let history: Vec<Round> = history.into_iter().cloned().collect();
        let score = rounds::total_score(&history);
        let percentage = rounds::match_percentage(score, total_rounds);

        Ok(ScoreSummary {
            score,
            percentage,
            message: rounds::match_message(percentage).to_string(),
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
