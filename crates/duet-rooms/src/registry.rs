//! Player registry: joining, readiness, liveness.
//!
//! Presence is deliberately thin on the write side — `heartbeat` just
//! stamps `last_seen`, and "online" is derived on read via
//! [`Player::is_online`]. There is no server-side timeout job and no one
//! is ever force-removed for going quiet.

use duet_model::{now_millis, Player, PlayerId, RoomCode, RoomId};
use duet_store::Store;
use serde::{Deserialize, Serialize};

use crate::RoomError;

/// Maximum players per room. Duet is strictly a two-player game.
const MAX_PLAYERS: usize = 2;

/// What a guest gets back from [`join_room`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedRoom {
    pub room_id: RoomId,
    pub player_id: PlayerId,
}

/// Joins the room with this code as a new player, not ready, seen now.
///
/// Guard order mirrors what a joiner can fix: unknown code first, then a
/// game already underway, then a full room, then a name clash.
pub fn join_room(
    store: &mut Store,
    code: &RoomCode,
    name: &str,
    avatar: &str,
) -> Result<JoinedRoom, RoomError> {
    let room = store
        .room_by_code(code)
        .ok_or_else(|| RoomError::CodeNotFound(code.clone()))?;
    if !room.status.is_joinable() {
        return Err(RoomError::NotInLobby(room.status));
    }
    let room_id = room.id;

    let players = store.players_in(room_id);
    if players.len() >= MAX_PLAYERS {
        return Err(RoomError::RoomFull(room_id));
    }
    if players.iter().any(|p| p.name == name) {
        return Err(RoomError::NameTaken(name.to_string()));
    }

    let player_id = store.insert_player(
        room_id,
        name.to_string(),
        avatar.to_string(),
        now_millis(),
    )?;

    tracing::info!(%room_id, %player_id, name, "player joined");
    Ok(JoinedRoom { room_id, player_id })
}

/// Sets a player's readiness flag.
///
/// Unconditional patch, last write wins — no state-machine guard beyond
/// existence, so a client can toggle freely (and redundant calls are
/// harmless).
pub fn set_ready(
    store: &mut Store,
    player_id: PlayerId,
    ready: bool,
) -> Result<(), RoomError> {
    let player = store
        .player_mut(player_id)
        .ok_or(RoomError::PlayerNotFound(player_id))?;
    player.ready = ready;
    tracing::debug!(%player_id, ready, "readiness updated");
    Ok(())
}

/// Refreshes a player's `last_seen` to now.
///
/// Called by an active client on a [`HEARTBEAT_INTERVAL`] cadence; the
/// core only records the stamp.
///
/// [`HEARTBEAT_INTERVAL`]: duet_model::HEARTBEAT_INTERVAL
pub fn heartbeat(store: &mut Store, player_id: PlayerId) -> Result<(), RoomError> {
    let player = store
        .player_mut(player_id)
        .ok_or(RoomError::PlayerNotFound(player_id))?;
    player.last_seen = now_millis();
    tracing::trace!(%player_id, "heartbeat");
    Ok(())
}

/// All players in a room, in join order. Empty for an unknown room.
pub fn players_in_room(store: &Store, room_id: RoomId) -> Vec<Player> {
    store.players_in(room_id).into_iter().cloned().collect()
}
