//! Room lifecycle: creation, composite lookup, and game start.

use duet_model::{
    now_millis, Player, PlayerId, QuestionId, Room, RoomCode, RoomId, RoomStatus,
};
use duet_store::{Store, StoreError};
use serde::{Deserialize, Serialize};

use crate::RoomError;

/// The deck every new room points at until `start_game` echoes one.
pub const DEFAULT_DECK_ID: &str = "soft-sweet-visual";

/// Rounds per game. Fixed at room creation.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 10;

/// How many fresh codes to try before giving up on room creation.
const CODE_RETRY_LIMIT: u32 = 32;

/// What the host gets back from [`create_room`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRoom {
    pub room_id: RoomId,
    /// The shareable join code, to display to the host.
    pub code: RoomCode,
    pub host_player_id: PlayerId,
}

/// Composite read model: a room plus everyone in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room: Room,
    pub players: Vec<Player>,
}

/// Creates a room in the lobby state and its host player, bound as
/// `host_id`.
///
/// The join code is sampled at random and checked against the store's
/// unique by-code index; on collision a fresh code is sampled, up to
/// [`CODE_RETRY_LIMIT`] times.
///
/// # Errors
/// [`RoomError::CodeSpaceExhausted`] if every attempt collided (practically
/// unreachable), or a store error.
pub fn create_room(
    store: &mut Store,
    host_name: &str,
    host_avatar: &str,
) -> Result<CreatedRoom, RoomError> {
    let now = now_millis();
    let room_id = insert_room_with_fresh_code(store, now)?;

    let host_id = store.insert_player(
        room_id,
        host_name.to_string(),
        host_avatar.to_string(),
        now,
    )?;

    // Bind the host. The room row was created before the player row could
    // exist, so the binding is a second write — still within this single
    // atomic operation.
    let room = store.room_mut(room_id).expect("room inserted above");
    room.host_id = host_id;
    let code = room.code.clone();

    tracing::info!(%room_id, %host_id, %code, "room created");
    Ok(CreatedRoom {
        room_id,
        code,
        host_player_id: host_id,
    })
}

/// Generate-check-retry: sample a code, let the unique index arbitrate.
fn insert_room_with_fresh_code(store: &mut Store, now: u64) -> Result<RoomId, RoomError> {
    let mut rng = rand::rng();
    for attempt in 0..CODE_RETRY_LIMIT {
        let code = RoomCode::generate(&mut rng);
        match store.insert_room(
            code,
            DEFAULT_DECK_ID.to_string(),
            DEFAULT_TOTAL_ROUNDS,
            now,
        ) {
            Ok(room_id) => return Ok(room_id),
            Err(StoreError::CodeTaken(code)) => {
                tracing::warn!(%code, attempt, "room code collision, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }
    Err(RoomError::CodeSpaceExhausted)
}

/// Read-only composite fetch: the room with this code, plus its players.
pub fn room_by_code(store: &Store, code: &RoomCode) -> Option<RoomSnapshot> {
    let room = store.room_by_code(code)?.clone();
    let players = store
        .players_in(room.id)
        .into_iter()
        .cloned()
        .collect();
    Some(RoomSnapshot { room, players })
}

/// Starts the game: lobby → in progress, question sequence fixed, round 0
/// created.
///
/// Preconditions, all checked before the first write:
/// - the room exists and is still in the lobby
/// - exactly two players have joined
/// - every player is ready
/// - `question_ids` has exactly `total_rounds` entries
///
/// The `deck_id` the presentation drew the questions from is echoed onto
/// the room.
pub fn start_game(
    store: &mut Store,
    room_id: RoomId,
    deck_id: &str,
    question_ids: Vec<QuestionId>,
) -> Result<(), RoomError> {
    let room = store
        .room(room_id)
        .ok_or(RoomError::RoomNotFound(room_id))?;
    if room.status != RoomStatus::Lobby {
        return Err(RoomError::NotInLobby(room.status));
    }
    let total_rounds = room.total_rounds;

    let players = store.players_in(room_id);
    if players.len() != 2 {
        return Err(RoomError::NotEnoughPlayers {
            have: players.len(),
        });
    }
    if !players.iter().all(|p| p.ready) {
        return Err(RoomError::PlayersNotReady);
    }

    if question_ids.len() != total_rounds as usize {
        return Err(RoomError::WrongQuestionCount {
            expected: total_rounds,
            got: question_ids.len(),
        });
    }

    // All guards passed. Round 0 first: the insert is the only effect that
    // can fail, so ordering it before the room patch means a failure
    // leaves no partial mutation.
    store.insert_round(room_id, 0, question_ids[0].clone())?;

    let room = store.room_mut(room_id).expect("existence checked above");
    room.status = RoomStatus::InProgress;
    room.deck_id = deck_id.to_string();
    room.question_sequence = question_ids;
    room.current_round_index = 0;

    tracing::info!(%room_id, deck_id, total_rounds, "game started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{join_room, set_ready};

    fn qids(n: usize) -> Vec<QuestionId> {
        (0..n).map(|i| QuestionId::new(format!("q{i}"))).collect()
    }

    /// A lobby with a ready host and a ready guest.
    fn lobby_with_two_ready(store: &mut Store) -> (RoomId, PlayerId, PlayerId) {
        let created = create_room(store, "Ava", "🙂").unwrap();
        let joined = join_room(store, &created.code, "Ben", "😎").unwrap();
        set_ready(store, created.host_player_id, true).unwrap();
        set_ready(store, joined.player_id, true).unwrap();
        (created.room_id, created.host_player_id, joined.player_id)
    }

    // =====================================================================
    // create_room()
    // =====================================================================

    #[test]
    fn test_create_room_starts_lobby_with_defaults() {
        let mut store = Store::new();

        let created = create_room(&mut store, "Ava", "🙂").unwrap();

        let room = store.room(created.room_id).unwrap();
        assert_eq!(room.status, RoomStatus::Lobby);
        assert_eq!(room.deck_id, DEFAULT_DECK_ID);
        assert_eq!(room.total_rounds, DEFAULT_TOTAL_ROUNDS);
        assert!(room.question_sequence.is_empty());
    }

    #[test]
    fn test_create_room_binds_host_player() {
        let mut store = Store::new();

        let created = create_room(&mut store, "Ava", "🙂").unwrap();

        let room = store.room(created.room_id).unwrap();
        assert_eq!(room.host_id, created.host_player_id);

        let host = store.player(created.host_player_id).unwrap();
        assert_eq!(host.room_id, created.room_id);
        assert_eq!(host.name, "Ava");
        assert!(!host.ready, "host starts not ready");
    }

    #[test]
    fn test_create_room_refetch_by_code_returns_same_room() {
        let mut store = Store::new();
        let created = create_room(&mut store, "Ava", "🙂").unwrap();

        let snapshot = room_by_code(&store, &created.code).unwrap();

        assert_eq!(snapshot.room.id, created.room_id);
        assert_eq!(snapshot.players.len(), 1);
    }

    #[test]
    fn test_create_room_batch_produces_unique_codes() {
        // Codes are unique across many rooms in the same store: the unique
        // index arbitrates and the retry loop absorbs any collision.
        let mut store = Store::new();
        let mut codes = std::collections::HashSet::new();

        for _ in 0..200 {
            let created = create_room(&mut store, "Ava", "🙂").unwrap();
            assert!(codes.insert(created.code), "duplicate code handed out");
        }
        assert_eq!(store.room_count(), 200);
    }

    // =====================================================================
    // room_by_code()
    // =====================================================================

    #[test]
    fn test_room_by_code_unknown_returns_none() {
        let store = Store::new();
        let code = RoomCode::parse("ZZZZZZ").unwrap();
        assert!(room_by_code(&store, &code).is_none());
    }

    #[test]
    fn test_room_by_code_lists_both_players_host_first() {
        let mut store = Store::new();
        let created = create_room(&mut store, "Ava", "🙂").unwrap();
        join_room(&mut store, &created.code, "Ben", "😎").unwrap();

        let snapshot = room_by_code(&store, &created.code).unwrap();

        let names: Vec<&str> =
            snapshot.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ava", "Ben"]);
    }

    // =====================================================================
    // start_game()
    // =====================================================================

    #[test]
    fn test_start_game_transitions_and_creates_round_zero() {
        let mut store = Store::new();
        let (room_id, _, _) = lobby_with_two_ready(&mut store);

        start_game(&mut store, room_id, "deck-x", qids(10)).unwrap();

        let room = store.room(room_id).unwrap();
        assert_eq!(room.status, RoomStatus::InProgress);
        assert_eq!(room.current_round_index, 0);
        assert_eq!(room.deck_id, "deck-x");
        assert_eq!(room.question_sequence.len(), 10);

        let round = store.round(room_id, 0).unwrap();
        assert_eq!(round.question_id, QuestionId::from("q0"));
        assert!(round.locked.is_empty());
        assert!(round.answers.is_empty());
        assert!(!round.revealed);

        // Exactly one round exists.
        assert_eq!(store.rounds_in(room_id).len(), 1);
    }

    #[test]
    fn test_start_game_unknown_room_returns_not_found() {
        let mut store = Store::new();
        let result = start_game(&mut store, RoomId(99), "deck", qids(10));
        assert!(matches!(result, Err(RoomError::RoomNotFound(RoomId(99)))));
    }

    #[test]
    fn test_start_game_twice_returns_not_in_lobby() {
        let mut store = Store::new();
        let (room_id, _, _) = lobby_with_two_ready(&mut store);
        start_game(&mut store, room_id, "deck", qids(10)).unwrap();

        let result = start_game(&mut store, room_id, "deck", qids(10));

        assert!(matches!(
            result,
            Err(RoomError::NotInLobby(RoomStatus::InProgress))
        ));
    }

    #[test]
    fn test_start_game_with_one_player_rejected() {
        let mut store = Store::new();
        let created = create_room(&mut store, "Ava", "🙂").unwrap();
        set_ready(&mut store, created.host_player_id, true).unwrap();

        let result = start_game(&mut store, created.room_id, "deck", qids(10));

        assert!(matches!(
            result,
            Err(RoomError::NotEnoughPlayers { have: 1 })
        ));
        // No partial mutation: still a lobby, no rounds.
        let room = store.room(created.room_id).unwrap();
        assert_eq!(room.status, RoomStatus::Lobby);
        assert!(store.rounds_in(created.room_id).is_empty());
    }

    #[test]
    fn test_start_game_with_unready_player_rejected() {
        let mut store = Store::new();
        let created = create_room(&mut store, "Ava", "🙂").unwrap();
        let joined = join_room(&mut store, &created.code, "Ben", "😎").unwrap();
        set_ready(&mut store, created.host_player_id, true).unwrap();
        // Ben never readies up.
        let _ = joined;

        let result = start_game(&mut store, created.room_id, "deck", qids(10));

        assert!(matches!(result, Err(RoomError::PlayersNotReady)));
    }

    #[test]
    fn test_start_game_wrong_question_count_rejected() {
        let mut store = Store::new();
        let (room_id, _, _) = lobby_with_two_ready(&mut store);

        for n in [0, 9, 11] {
            let result = start_game(&mut store, room_id, "deck", qids(n));
            assert!(
                matches!(
                    result,
                    Err(RoomError::WrongQuestionCount { expected: 10, got }) if got == n
                ),
                "length {n} should be rejected"
            );
        }

        // Still startable with the right count afterwards.
        start_game(&mut store, room_id, "deck", qids(10)).unwrap();
    }
}
