//! Error types for the Anikama core library.

use thiserror::Error;

/// Top-level error type for all store and service operations.
///
/// The engine itself never fails; everything here comes from resolving
/// inputs or persisting results.
#[derive(Error, Debug)]
pub enum AffinityError {
    /// The referenced companion does not exist.
    #[error("Companion not found: {0}")]
    CompanionNotFound(crate::CompanionId),

    /// The caller asked for an action the progression track doesn't reward.
    #[error("Invalid action type: {0}")]
    InvalidAction(String),

    /// A stored value could not be decoded back into its domain type.
    #[error("Corrupt record in {table}: {reason}")]
    CorruptRecord {
        /// Table the row came from.
        table: &'static str,
        /// What failed to decode.
        reason: String,
    },

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AffinityError {
    /// Whether this error means "the thing you asked about doesn't exist",
    /// as opposed to an internal failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CompanionNotFound(_))
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AffinityError>;
