//! Room codes: the short, human-shareable handle for a room.
//!
//! A code is exactly six characters from `A–Z0–9` — easy to read out loud
//! or type on a phone. Codes are case-insensitive on input (normalized to
//! uppercase, punctuation and spaces stripped) but always stored and
//! compared uppercase.
//!
//! Generation here is a plain uniform sample with no uniqueness check;
//! uniqueness is a *store* invariant, enforced by the unique by-code index
//! plus a bounded retry loop in `create_room`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a room code, in characters.
pub const CODE_LEN: usize = 6;

/// The alphabet codes are sampled from. No lowercase, no punctuation —
/// unambiguous when read aloud.
const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Errors from parsing user-supplied room codes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeError {
    /// After normalization the input was not exactly six `A-Z0-9` chars.
    #[error("room code must be {CODE_LEN} characters of A-Z or 0-9, got {0:?}")]
    Invalid(String),
}

/// A validated 6-character room code.
///
/// The only ways to obtain one are [`RoomCode::generate`] and
/// [`RoomCode::parse`], so every value in circulation upholds the format
/// invariant. Serde round-trips through `String` via the same `parse`, so
/// deserialized codes are validated too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Samples a random code, uniform over the 36^6 keyspace.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| CHARS[rng.random_range(0..CHARS.len())] as char)
            .collect();
        Self(code)
    }

    /// Parses user input into a code.
    ///
    /// Normalizes first — uppercases and strips every non-alphanumeric
    /// character — so `"abc 123"`, `"ABC-123"` and `"ABC123"` all parse to
    /// the same code.
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        let normalized: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if normalized.len() != CODE_LEN {
            return Err(CodeError::Invalid(input.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The raw 6-character form, e.g. `"ABC123"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The display form grouped in triples, e.g. `"ABC 123"`.
    pub fn pretty(&self) -> String {
        format!("{} {}", &self.0[..3], &self.0[3..])
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}
