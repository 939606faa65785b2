//! Rejections raised by the pure results engine.

use thiserror::Error;

/// Shorthand for results of engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Synchronous, non-retryable failures of the results engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A raw attempt code is malformed or misplaced.
    #[error("invalid attempt value `{value}` at position {index}: {reason}")]
    InvalidAttemptValue {
        /// Zero-based attempt position.
        index: usize,
        /// Offending raw code.
        value: i64,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Attempt count disagrees with the round format and cutoff.
    #[error("expected {expected} attempts, got {actual}: {reason}")]
    IncompleteAttempts {
        /// Attempts required by the format.
        expected: usize,
        /// Attempts supplied.
        actual: usize,
        /// Why the shortfall (or surplus) is not explained.
        reason: &'static str,
    },

    /// Proceed rule cannot be evaluated.
    #[error("invalid proceed rule: {reason} (value {value})")]
    InvalidProceedRule {
        /// Supplied rule value.
        value: i64,
        /// What is wrong with it.
        reason: &'static str,
    },
}
