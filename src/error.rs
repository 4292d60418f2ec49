//! Error types for race averaging
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need to branch on a specific failure use
//! `downcast_ref::<RaceAverageError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific averaging scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RaceAverageError {
    #[error("Invalid number of finish times: {count} (expected between 1 and 50 inclusive)")]
    InvalidInputCount { count: usize },

    #[error("Malformed finish time {input:?}: {reason}")]
    MalformedTimeString { input: String, reason: String },

    #[error("Invalid percentage: {value}")]
    InvalidPercentage { value: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid cache options: {message}")]
    InvalidCacheOptions { message: String },

    #[error("Cannot take {bits} index bits from a key of {available_bits} bits")]
    KeyIndexOutOfRange { bits: u32, available_bits: usize },
}

impl RaceAverageError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        RaceAverageError::MalformedTimeString {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
