//! Storage error model.

use thiserror::Error;

/// Result type used across the storage layer.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level error.
///
/// Only construction-time and configuration faults end up here. Policy
/// rejections (refused injection, denied extraction, hidden contents) are
/// ordinary return values and never produce a `StorageError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A stack or inventory of one storage channel was used where another
    /// channel was required.
    #[error("channel mismatch: expected {expected}, found {found}")]
    ChannelMismatch { expected: String, found: String },

    /// Handler settings could not be parsed or were inconsistent.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A value failed validation (e.g. malformed resource key).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl StorageError {
    pub fn channel_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::ChannelMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn invalid_settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
