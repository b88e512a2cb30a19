//! Question content types and the provider seam.
//!
//! Duet doesn't ship question content — decks, prompt copy, and option
//! artwork live with the presentation side. The core defines the [shape]
//! of a question and the [`QuestionSource`] trait it is fetched through,
//! and otherwise only ever handles `QuestionId`/`OptionId` values.
//!
//! [shape]: Question

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{OptionId, QuestionId};

/// One of a question's four answer options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    /// Short human label ("Sunrise hike").
    pub label: String,
    /// Image reference for option art. Opaque to the core.
    pub image: String,
}

/// An image-based multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// The deck this question belongs to.
    pub deck_id: String,
    /// The prompt shown to both players.
    pub text: String,
    /// Exactly four options — the fixed-size array enforces it.
    pub options: [QuestionOption; 4],
}

/// Provides question content for a deck.
///
/// This is the seam between the core and whatever owns content — a static
/// JSON bundle, a CMS, a test fixture. The core calls it once, at game
/// start, to draw the question sequence.
pub trait QuestionSource {
    /// Returns the full ordered question list for a deck, or `None` if the
    /// deck id is unknown.
    fn deck(&self, deck_id: &str) -> Option<Vec<Question>>;
}

/// Draws `count` question ids from a deck, pre-shuffled.
///
/// Returns `None` if the deck is unknown or holds fewer than `count`
/// questions. The shuffle happens once, here — the sequence is fixed for
/// the rest of the game.
pub fn draw_questions(
    source: &impl QuestionSource,
    deck_id: &str,
    count: usize,
) -> Option<Vec<QuestionId>> {
    let questions = source.deck(deck_id)?;
    if questions.len() < count {
        return None;
    }

    let mut ids: Vec<QuestionId> = questions.into_iter().map(|q| q.id).collect();
    ids.shuffle(&mut rand::rng());
    ids.truncate(count);
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixture deck with `n` questions, ids "q0".."q{n-1}".
    struct FixtureDeck(usize);

    impl QuestionSource for FixtureDeck {
        fn deck(&self, deck_id: &str) -> Option<Vec<Question>> {
            if deck_id != "fixture" {
                return None;
            }
            Some(
                (0..self.0)
                    .map(|i| Question {
                        id: QuestionId::new(format!("q{i}")),
                        deck_id: "fixture".to_string(),
                        text: format!("Question {i}?"),
                        options: std::array::from_fn(|o| QuestionOption {
                            id: OptionId::new(format!("q{i}-opt{o}")),
                            label: format!("Option {o}"),
                            image: format!("img/q{i}/{o}.webp"),
                        }),
                    })
                    .collect(),
            )
        }
    }

    #[test]
    fn test_draw_questions_returns_requested_count() {
        let ids = draw_questions(&FixtureDeck(20), "fixture", 10).unwrap();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_draw_questions_yields_distinct_ids() {
        let ids = draw_questions(&FixtureDeck(20), "fixture", 10).unwrap();
        let mut unique = ids.clone();
        unique.sort_by(|a, b| a.0.cmp(&b.0));
        unique.dedup();
        assert_eq!(unique.len(), ids.len(), "drawn ids must not repeat");
    }

    #[test]
    fn test_draw_questions_unknown_deck_returns_none() {
        assert!(draw_questions(&FixtureDeck(20), "no-such-deck", 10).is_none());
    }

    #[test]
    fn test_draw_questions_undersized_deck_returns_none() {
        assert!(draw_questions(&FixtureDeck(5), "fixture", 10).is_none());
    }
}
