//! Round operations: lock, reveal, advance, and the read queries.

use duet_model::{OptionId, PlayerId, RoomId, RoomStatus, Round};
use duet_store::Store;
use serde::{Deserialize, Serialize};

use crate::RoundError;

/// The outcome of [`advance_round`].
///
/// Serializes with a `"status"` tag (`{"status":"finished"}` /
/// `{"status":"in_progress","index":3}`) for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Advance {
    /// The last round was played; the room is now finished.
    Finished,
    /// The game continues at this round index. A duplicate call reports
    /// the already-current index here.
    InProgress { index: u32 },
}

/// Read query: the round at this index, if it exists yet.
pub fn current_round(store: &Store, room_id: RoomId, round_index: u32) -> Option<Round> {
    store.round(room_id, round_index).cloned()
}

/// Read query: the room's full round history, ordered by index.
pub fn all_rounds(store: &Store, room_id: RoomId) -> Vec<Round> {
    store.rounds_in(room_id).into_iter().cloned().collect()
}

/// Locks (or re-locks) a player's answer for a round.
///
/// Guards: the round exists, is not revealed, and the player belongs to
/// the round's room. The effect touches only this player's keys in the
/// `answers`/`locked` maps — an in-place upsert, so two players locking
/// concurrently can never clobber each other's entry. Re-locking with a
/// different option before the reveal overwrites the previous choice
/// (last value wins).
pub fn lock_answer(
    store: &mut Store,
    room_id: RoomId,
    round_index: u32,
    player_id: PlayerId,
    option_id: OptionId,
) -> Result<(), RoundError> {
    let round = store
        .round(room_id, round_index)
        .ok_or(RoundError::RoundNotFound(room_id, round_index))?;
    if round.revealed {
        return Err(RoundError::AlreadyRevealed(room_id, round_index));
    }

    let player = store
        .player(player_id)
        .ok_or(RoundError::PlayerNotFound(player_id))?;
    if player.room_id != room_id {
        return Err(RoundError::PlayerNotInRoom(player_id, room_id));
    }

    let round = store
        .round_mut(room_id, round_index)
        .expect("existence checked above");
    round.answers.insert(player_id, option_id);
    round.locked.insert(player_id, true);

    tracing::debug!(%room_id, round_index, %player_id, "answer locked");
    Ok(())
}

/// Reveals a round: compares both players' locked answers and fixes the
/// score delta. Returns the delta (1 on a match, 0 otherwise).
///
/// This is the single point where the match outcome is decided, and it
/// runs exactly once per round: the `revealed` flag is checked and set
/// within the same store lock, so of two racing reveal calls exactly one
/// mutates — the other gets [`RoundError::AlreadyRevealed`] with the
/// stored delta untouched.
pub fn reveal_round(
    store: &mut Store,
    room_id: RoomId,
    round_index: u32,
    player_a: PlayerId,
    player_b: PlayerId,
) -> Result<u32, RoundError> {
    let round = store
        .round(room_id, round_index)
        .ok_or(RoundError::RoundNotFound(room_id, round_index))?;
    if round.revealed {
        return Err(RoundError::AlreadyRevealed(room_id, round_index));
    }
    for player in [player_a, player_b] {
        if !round.has_locked(player) {
            return Err(RoundError::NotLocked(player));
        }
    }

    // locked[p] implies answers[p] exists, so both lookups succeed and a
    // match is a plain equality of the two option ids.
    let matched = round.answers.get(&player_a) == round.answers.get(&player_b);
    let score_delta = u32::from(matched);

    let round = store
        .round_mut(room_id, round_index)
        .expect("existence checked above");
    round.score_delta = score_delta;
    round.revealed = true;

    tracing::info!(%room_id, round_index, score_delta, "round revealed");
    Ok(score_delta)
}

/// Advances the room past a revealed round — creating the next round, or
/// finishing the game after the last one.
///
/// Idempotent by design: both clients' auto-advance timers may call this
/// at once. The guard is "only advance past a revealed round" — if the
/// current round isn't revealed (because the partner's call already moved
/// the index to a fresh round), the call is a no-op reporting the current
/// index. Calls after the game finished report [`Advance::Finished`].
pub fn advance_round(store: &mut Store, room_id: RoomId) -> Result<Advance, RoundError> {
    let room = store
        .room(room_id)
        .ok_or(RoundError::RoomNotFound(room_id))?;
    match room.status {
        RoomStatus::Finished => return Ok(Advance::Finished),
        RoomStatus::Lobby => return Err(RoundError::NotInProgress(room.status)),
        RoomStatus::InProgress => {}
    }

    let current = room.current_round_index;
    let total_rounds = room.total_rounds;
    let next = current + 1;
    let next_question = room.question_sequence.get(next as usize).cloned();

    let current_revealed = store
        .round(room_id, current)
        .map(|r| r.revealed)
        .unwrap_or(false);
    if !current_revealed {
        // Duplicate or premature call — the round at the current index is
        // still being played. Report where the game already is.
        return Ok(Advance::InProgress { index: current });
    }

    if next == total_rounds {
        let room = store.room_mut(room_id).expect("existence checked above");
        room.status = RoomStatus::Finished;
        tracing::info!(%room_id, total_rounds, "game finished");
        return Ok(Advance::Finished);
    }

    // The sequence length was fixed to total_rounds at game start, and
    // next < total_rounds here.
    let question_id = next_question.expect("sequence covers every round index");
    store.insert_round(room_id, next, question_id)?;
    let room = store.room_mut(room_id).expect("existence checked above");
    room.current_round_index = next;

    tracing::info!(%room_id, index = next, "advanced to next round");
    Ok(Advance::InProgress { index: next })
}
