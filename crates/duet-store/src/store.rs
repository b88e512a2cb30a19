//! The tables and indexes.

use std::collections::HashMap;

use duet_model::{
    Player, PlayerId, QuestionId, Room, RoomCode, RoomId, RoomStatus, Round, RoundId,
};

use crate::StoreError;

/// In-memory tables for one server's worth of game sessions.
///
/// Three primary tables keyed by id, plus the secondary indexes the
/// operations look things up through:
///
/// - `rooms_by_code` — unique; inserting a duplicate code fails
/// - `players_by_room` — insertion-ordered (host first)
/// - `rounds_by_room_index` — unique per (room, round index)
///
/// Indexes are kept in sync with their tables by the insert methods; rows
/// are never deleted (a session's data lives as long as the store — see
/// the no-garbage-collection note in DESIGN.md).
pub struct Store {
    /// Single id sequence shared by all tables. Ids are opaque to callers,
    /// so one counter is simpler than three.
    next_id: u64,

    rooms: HashMap<RoomId, Room>,
    rooms_by_code: HashMap<RoomCode, RoomId>,

    players: HashMap<PlayerId, Player>,
    players_by_room: HashMap<RoomId, Vec<PlayerId>>,

    rounds: HashMap<RoundId, Round>,
    rounds_by_room_index: HashMap<(RoomId, u32), RoundId>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            rooms: HashMap::new(),
            rooms_by_code: HashMap::new(),
            players: HashMap::new(),
            players_by_room: HashMap::new(),
            rounds: HashMap::new(),
            rounds_by_room_index: HashMap::new(),
        }
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // -- Rooms ------------------------------------------------------------

    /// Inserts a new room in the lobby state.
    ///
    /// The host id is left at a placeholder: ids are allocated by the
    /// store, so the room row has to exist before the host player row can
    /// reference it. `create_room` binds `host_id` immediately after, all
    /// within the same atomic operation.
    ///
    /// # Errors
    /// [`StoreError::CodeTaken`] if a room with this code already exists —
    /// the by-code index is unique.
    pub fn insert_room(
        &mut self,
        code: RoomCode,
        deck_id: String,
        total_rounds: u32,
        created_at: u64,
    ) -> Result<RoomId, StoreError> {
        if self.rooms_by_code.contains_key(&code) {
            return Err(StoreError::CodeTaken(code));
        }

        let id = RoomId(self.alloc());
        let room = Room {
            id,
            code: code.clone(),
            status: RoomStatus::Lobby,
            deck_id,
            total_rounds,
            created_at,
            host_id: PlayerId(0),
            current_round_index: 0,
            question_sequence: Vec::new(),
        };

        self.rooms_by_code.insert(code, id);
        self.rooms.insert(id, room);
        tracing::trace!(room_id = %id, "room row inserted");
        Ok(id)
    }

    /// Looks up a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Mutable lookup, for the operation layers' patches.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    /// Indexed lookup by join code.
    pub fn room_by_code(&self, code: &RoomCode) -> Option<&Room> {
        let id = self.rooms_by_code.get(code)?;
        self.rooms.get(id)
    }

    /// Number of rooms in the store.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    // -- Players ----------------------------------------------------------

    /// Inserts a new player row for an existing room, not ready, with the
    /// given heartbeat timestamp.
    ///
    /// Referential integrity only — the "at most 2 players" and duplicate
    /// name rules are domain preconditions checked by the registry.
    ///
    /// # Errors
    /// [`StoreError::RoomMissing`] if the room doesn't exist.
    pub fn insert_player(
        &mut self,
        room_id: RoomId,
        name: String,
        avatar: String,
        last_seen: u64,
    ) -> Result<PlayerId, StoreError> {
        if !self.rooms.contains_key(&room_id) {
            return Err(StoreError::RoomMissing(room_id));
        }

        let id = PlayerId(self.alloc());
        let player = Player {
            id,
            room_id,
            name,
            avatar,
            ready: false,
            last_seen,
        };

        self.players_by_room.entry(room_id).or_default().push(id);
        self.players.insert(id, player);
        tracing::trace!(player_id = %id, %room_id, "player row inserted");
        Ok(id)
    }

    /// Looks up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Mutable lookup.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// All players in a room, in join order (host first).
    pub fn players_in(&self, room_id: RoomId) -> Vec<&Player> {
        self.players_by_room
            .get(&room_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.players.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    // -- Rounds -----------------------------------------------------------

    /// Inserts a fresh, unrevealed round with empty lock/answer maps.
    ///
    /// # Errors
    /// - [`StoreError::RoomMissing`] if the room doesn't exist
    /// - [`StoreError::DuplicateRound`] if a round already occupies this
    ///   (room, index) slot
    pub fn insert_round(
        &mut self,
        room_id: RoomId,
        round_index: u32,
        question_id: QuestionId,
    ) -> Result<RoundId, StoreError> {
        if !self.rooms.contains_key(&room_id) {
            return Err(StoreError::RoomMissing(room_id));
        }
        if self.rounds_by_room_index.contains_key(&(room_id, round_index)) {
            return Err(StoreError::DuplicateRound(room_id, round_index));
        }

        let id = RoundId(self.alloc());
        let round = Round {
            id,
            room_id,
            round_index,
            question_id,
            locked: HashMap::new(),
            answers: HashMap::new(),
            score_delta: 0,
            revealed: false,
        };

        self.rounds_by_room_index.insert((room_id, round_index), id);
        self.rounds.insert(id, round);
        tracing::trace!(round_id = %id, %room_id, round_index, "round row inserted");
        Ok(id)
    }

    /// Indexed lookup by (room, round index).
    pub fn round(&self, room_id: RoomId, round_index: u32) -> Option<&Round> {
        let id = self.rounds_by_room_index.get(&(room_id, round_index))?;
        self.rounds.get(id)
    }

    /// Mutable indexed lookup.
    pub fn round_mut(&mut self, room_id: RoomId, round_index: u32) -> Option<&mut Round> {
        let id = self.rounds_by_room_index.get(&(room_id, round_index))?;
        self.rounds.get_mut(id)
    }

    /// All rounds of a room, sorted by round index.
    pub fn rounds_in(&self, room_id: RoomId) -> Vec<&Round> {
        let mut rounds: Vec<&Round> = self
            .rounds
            .values()
            .filter(|r| r.room_id == room_id)
            .collect();
        rounds.sort_by_key(|r| r.round_index);
        rounds
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
