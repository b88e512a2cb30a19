//! A scripted full game, start to finish, against an in-memory deck.
//!
//! Run with logging to watch the state machine move:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example full_game
//! ```

use duet::prelude::*;
use duet::{draw_questions, DEFAULT_DECK_ID, DEFAULT_TOTAL_ROUNDS};

/// A tiny stand-in for the real content provider: twelve questions, four
/// options each.
struct DemoDeck;

impl QuestionSource for DemoDeck {
    fn deck(&self, deck_id: &str) -> Option<Vec<Question>> {
        if deck_id != DEFAULT_DECK_ID {
            return None;
        }
        Some(
            (0..12)
                .map(|i| Question {
                    id: QuestionId::new(format!("q{i}")),
                    deck_id: deck_id.to_string(),
                    text: format!("Which of these feels most like a perfect evening? (#{i})"),
                    options: std::array::from_fn(|o| duet::QuestionOption {
                        id: OptionId::new(format!("q{i}-opt{o}")),
                        label: format!("Option {o}"),
                        image: format!("img/q{i}/{o}.webp"),
                    }),
                })
                .collect(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), DuetError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let game = Game::new();

    // Lobby: Ava hosts, Ben joins with the pretty-printed code.
    let created = game.create_room("Ava", "🙂").await?;
    println!("room code: {}", created.code.pretty());

    let code = RoomCode::parse(&created.code.pretty()).expect("pretty form re-parses");
    let joined = game.join_room(&code, "Ben", "😎").await?;
    let (ava, ben) = (created.host_player_id, joined.player_id);

    game.set_ready(ava, true).await?;
    game.set_ready(ben, true).await?;

    // Draw the fixed, pre-shuffled sequence from the deck and start.
    let questions = draw_questions(&DemoDeck, DEFAULT_DECK_ID, DEFAULT_TOTAL_ROUNDS as usize)
        .expect("demo deck is big enough");
    game.start_game(created.room_id, DEFAULT_DECK_ID, questions).await?;

    // Play: the two agree on even rounds, disagree on odd ones.
    for i in 0..DEFAULT_TOTAL_ROUNDS {
        let round = game
            .current_round(created.room_id, i)
            .await
            .expect("current round exists");

        let ava_pick = OptionId::new(format!("{}-opt0", round.question_id));
        let ben_pick = if i % 2 == 0 {
            ava_pick.clone()
        } else {
            OptionId::new(format!("{}-opt1", round.question_id))
        };

        game.lock_answer(created.room_id, i, ava, ava_pick).await?;
        game.lock_answer(created.room_id, i, ben, ben_pick).await?;

        let delta = game.reveal_round(created.room_id, i, ava, ben).await?;
        println!("round {i}: {}", if delta == 1 { "match!" } else { "no match" });

        game.advance_round(created.room_id).await?;
    }

    let summary = game.score_summary(created.room_id).await?;
    println!(
        "final: {}/{} rounds matched ({}%) — {}",
        summary.score, DEFAULT_TOTAL_ROUNDS, summary.percentage, summary.message
    );

    Ok(())
}
