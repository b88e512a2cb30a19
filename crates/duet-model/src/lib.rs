//! Data model for Duet, a two-player picture-quiz party game.
//!
//! This crate defines every type the other layers agree on — the shared
//! "vocabulary" of the system:
//!
//! - [`RoomId`], [`PlayerId`], [`RoundId`] — newtype ids
//! - [`RoomCode`] — the 6-character shareable join code
//! - [`RoomStatus`] — the room lifecycle state machine
//! - [`Room`], [`Player`], [`Round`] — the persisted entities
//! - [`Question`], [`QuestionSource`] — the question-content collaborator
//!
//! Everything here is plain data plus pure functions. State lives in
//! `duet-store`; the rules that mutate it live in `duet-rooms` and
//! `duet-rounds`.

mod code;
mod entities;
mod ids;
mod question;
mod status;
mod time;

pub use code::{CodeError, RoomCode, CODE_LEN};
pub use entities::{Player, Room, Round, HEARTBEAT_INTERVAL, PRESENCE_TIMEOUT};
pub use ids::{OptionId, PlayerId, QuestionId, RoomId, RoundId};
pub use question::{draw_questions, Question, QuestionOption, QuestionSource};
pub use status::RoomStatus;
pub use time::now_millis;
