//! Unified error type for the Duet core.

use duet_rooms::RoomError;
use duet_rounds::RoundError;
use duet_store::StoreError;

/// Top-level error that wraps all layer-specific errors.
///
/// Consumers of the `duet` facade deal with this single type instead of
/// importing errors from each sub-crate. The `#[from]` attribute on each
/// variant auto-generates `From` impls, so `?` converts layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum DuetError {
    /// A room lifecycle or registry error (not found, full, not ready,
    /// name taken, ...).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A round engine error (not locked, already revealed, ...).
    #[error(transparent)]
    Round(#[from] RoundError),

    /// A store invariant failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_model::{PlayerId, RoomId};

    #[test]
    fn test_from_room_error() {
        let err: DuetError = RoomError::RoomFull(RoomId(1)).into();
        assert!(matches!(err, DuetError::Room(_)));
        assert!(err.to_string().contains("full"));
    }

    #[test]
    fn test_from_round_error() {
        let err: DuetError = RoundError::NotLocked(PlayerId(2)).into();
        assert!(matches!(err, DuetError::Round(_)));
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn test_from_store_error() {
        let err: DuetError = StoreError::RoomMissing(RoomId(3)).into();
        assert!(matches!(err, DuetError::Store(_)));
    }
}
