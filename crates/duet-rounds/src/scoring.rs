//! Scoring aggregator: pure functions over a room's round history.

use duet_model::Round;

/// Total score so far: the sum of score deltas over *revealed* rounds.
///
/// Unrevealed rounds contribute nothing — their delta isn't decided yet.
/// (The reference implementation also defended against malformed deltas;
/// here the field is a `u32` the reveal wrote, so there is nothing
/// malformed left to defend against.)
pub fn total_score(rounds: &[Round]) -> u32 {
    rounds
        .iter()
        .filter(|r| r.revealed)
        .map(|r| r.score_delta)
        .sum()
}

/// Match percentage: `score / total_rounds`, rounded to the nearest whole
/// percent. Defined as 0 when `total_rounds` is 0.
pub fn match_percentage(score: u32, total_rounds: u32) -> u32 {
    if total_rounds == 0 {
        return 0;
    }
    ((score as f64 / total_rounds as f64) * 100.0).round() as u32
}

/// The banded compatibility message for a percentage.
///
/// Bands are monotonic and total: every percentage maps to exactly one
/// message. The copy (emoji included) is a product decision carried over
/// as-is.
pub fn match_message(percentage: u32) -> &'static str {
    match percentage {
        80.. => "Perfect match! 💕",
        60.. => "Great connection! 😍",
        40.. => "Good compatibility! 😊",
        20.. => "Some similarities! 🤔",
        _ => "Opposites attract! 😄",
    }
}
