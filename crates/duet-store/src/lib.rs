//! The session store for Duet: durable-for-the-session tables for rooms,
//! players, and rounds, with the three indexed lookups the operations need
//! (room by code, players by room, round by (room, round index)).
//!
//! # Concurrency note
//!
//! `Store` is NOT thread-safe by itself — it uses plain `HashMap`s, not
//! concurrent ones. This is intentional: the store has a single owner (the
//! `Game` facade in the `duet` crate) and every operation reaches it
//! through one mutex at that level. Each operation therefore runs as one
//! uninterrupted check-then-act unit, which is exactly the linearizability
//! the round engine's guards rely on. Keeping the store itself simple
//! avoids hidden locking and ordering surprises here.

mod error;
mod store;

pub use error::StoreError;
pub use store::Store;
