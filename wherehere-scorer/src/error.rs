//! Errors raised while configuring the scoring engine.

use thiserror::Error;

/// Errors returned when validating scoring configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScoringError {
    /// A weight was negative or not finite, or every weight was zero.
    #[error("score weights must be finite, non-negative and not all zero")]
    InvalidWeights,
    /// A distance decay constant was negative or not finite.
    #[error("distance decay must be finite and non-negative")]
    InvalidDecay,
}
