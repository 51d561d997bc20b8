//! Error types for the CFR solver.

use thiserror::Error;

use crate::cfr::config::ConfigError;

/// Errors raised by the solver.
///
/// Every variant is an invariant violation: the run cannot continue and the
/// caller should surface the diagnostic and stop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CfrError {
    /// A card rank outside 0..=2 was requested.
    #[error("Invalid card: {0}")]
    InvalidCard(u8),

    /// A deck was built with the same rank twice.
    #[error("Duplicate card in deck: {0}")]
    DuplicateCard(u8),

    /// A history that is not one of the recognized terminal shapes, or that
    /// would grow past three actions.
    #[error("Invalid history: {0:?}")]
    InvalidHistory(String),

    /// Average strategy requested for a node that was never reached.
    #[error("Division by zero: node {key:?} has zero accumulated reach")]
    DivisionByZero {
        /// Display form of the offending information set key.
        key: String,
    },

    /// A report could not be written as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Training configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CfrError>;
