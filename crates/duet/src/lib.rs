//! # Duet
//!
//! The authoritative session core of a two-player picture-quiz party game:
//! players join a shared room via a short code, mark ready, then answer a
//! fixed sequence of image-based multiple-choice questions — each round
//! scored by whether both players picked the same option.
//!
//! This crate is the composition point. The layers underneath:
//!
//! ```text
//! duet         ← Game facade: one mutex, every operation atomic
//! duet-rooms   ← lifecycle (create/start) + registry (join/ready/heartbeat)
//! duet-rounds  ← round engine (lock/reveal/advance) + scoring
//! duet-store   ← tables and indexes, single-owner
//! duet-model   ← ids, codes, status machine, entities
//! ```
//!
//! Rendering, timers, avatars, and option artwork are presentation
//! concerns that sit on top of this API; the core stays correct whether
//! their timers fire never, late, or twice at once.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use duet::{Game, OptionId, QuestionId};
//!
//! # async fn demo() -> Result<(), duet::DuetError> {
//! let game = Game::new();
//!
//! // Host creates a room, partner joins with the shareable code.
//! let created = game.create_room("Ava", "🙂").await?;
//! let joined = game.join_room(&created.code, "Ben", "😎").await?;
//!
//! // Both ready up, host starts with ten pre-shuffled question ids.
//! game.set_ready(created.host_player_id, true).await?;
//! game.set_ready(joined.player_id, true).await?;
//! let questions: Vec<QuestionId> =
//!     (0..10).map(|i| QuestionId::new(format!("q{i}"))).collect();
//! game.start_game(created.room_id, "soft-sweet-visual", questions).await?;
//!
//! // Round 0: both lock, someone reveals, someone advances.
//! game.lock_answer(created.room_id, 0, created.host_player_id, OptionId::new("a")).await?;
//! game.lock_answer(created.room_id, 0, joined.player_id, OptionId::new("a")).await?;
//! let delta = game.reveal_round(created.room_id, 0, created.host_player_id, joined.player_id).await?;
//! assert_eq!(delta, 1);
//! game.advance_round(created.room_id).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod game;

pub use error::DuetError;
pub use game::{Game, ScoreSummary};

// Re-export the vocabulary the API speaks.
pub use duet_model::{
    now_millis, CodeError, OptionId, Player, PlayerId, Question, QuestionId,
    QuestionOption, QuestionSource, Room, RoomCode, RoomId, RoomStatus, Round, RoundId,
    HEARTBEAT_INTERVAL, PRESENCE_TIMEOUT,
};
pub use duet_rooms::{
    CreatedRoom, JoinedRoom, RoomError, RoomSnapshot, DEFAULT_DECK_ID,
    DEFAULT_TOTAL_ROUNDS,
};
pub use duet_model::draw_questions;
pub use duet_rounds::{
    match_message, match_percentage, total_score, Advance, RoundError,
};

/// Everything a typical consumer needs, in one import.
pub mod prelude {
    pub use crate::{
        Advance, CreatedRoom, DuetError, Game, JoinedRoom, OptionId, Player, PlayerId,
        Question, QuestionId, QuestionSource, Room, RoomCode, RoomError, RoomId,
        RoomSnapshot, RoomStatus, Round, RoundError, ScoreSummary,
    };
}
