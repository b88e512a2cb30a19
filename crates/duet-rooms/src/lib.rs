//! Room lifecycle and player registry for Duet.
//!
//! Two concerns live here, both operating on the shared [`Store`]:
//!
//! - **Lifecycle** ([`create_room`], [`room_by_code`], [`start_game`]) —
//!   creating rooms with a unique join code, and the one-way transition
//!   from lobby to a running game.
//! - **Registry** ([`join_room`], [`set_ready`], [`heartbeat`],
//!   [`players_in_room`]) — who is in the room, whether they're ready,
//!   and when they were last seen.
//!
//! Every function is a single synchronous check-then-act unit against
//! `&mut Store`; the `duet` facade serializes them under one lock, which
//! is what makes each guard block atomic.
//!
//! [`Store`]: duet_store::Store

mod error;
mod lifecycle;
mod registry;

pub use error::RoomError;
pub use lifecycle::{
    create_room, room_by_code, start_game, CreatedRoom, RoomSnapshot, DEFAULT_DECK_ID,
    DEFAULT_TOTAL_ROUNDS,
};
pub use registry::{heartbeat, join_room, players_in_room, set_ready, JoinedRoom};
