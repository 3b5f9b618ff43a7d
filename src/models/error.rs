//! LadderError: everything the ladder operations can refuse with.

use crate::models::band::Band;
use crate::models::player::PlayerId;

/// Errors that can occur during ladder operations.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LadderError {
    /// Referenced player id is absent from the store.
    #[error("Player {0} not found")]
    NotFound(PlayerId),
    /// Band outside 1..=4 or position out of range for the band.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    /// A band's positions are not exactly 1..=N. Operations refuse to run on such a band.
    #[error("Band {band} positions are not dense: {positions:?}")]
    InvariantViolation { band: Band, positions: Vec<u32> },
    /// Match payload is inconsistent (same player twice, winner not a participant, ...).
    #[error("Invalid match: {0}")]
    InvalidMatch(String),
    /// Registration or profile data rejected (e.g. empty name).
    #[error("Invalid player: {0}")]
    InvalidPlayer(String),
    /// The record store refused a write.
    #[error("Record store failure: {0}")]
    Store(String),
}
