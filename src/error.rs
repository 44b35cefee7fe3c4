//! Error types for the balancing and rating engine
//!
//! Library operations return the typed [`BalancerError`] so callers can map each
//! failure to a user-facing message. Configuration loading and the driver binary
//! use anyhow on top of it for context chaining.

use crate::types::PlayerName;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BalancerError>;

/// Failure variants surfaced by the balancing and rating operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalancerError {
    #[error("Expected exactly {expected} distinct players, got {actual}")]
    InvalidInputSize { expected: usize, actual: usize },

    #[error("No feasible match: {reason}")]
    NoFeasibleMatch { reason: String },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Invalid match data: {reason}")]
    InvalidMatchData { reason: String },

    /// The caller handed over an incomplete snapshot. This is a bug on the
    /// caller's side, not a recoverable condition.
    #[error("No rating record for player: {player}")]
    MissingPlayerRecord { player: PlayerName },

    #[error("Invalid player record {player}: {reason}")]
    InvalidPlayer { player: PlayerName, reason: String },

    #[error("Rating calculation failed: {reason}")]
    RatingCalculationFailed { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
