//! Core error types.

use crate::value::ValueType;
use thiserror::Error;

/// Core store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Kind name outside the entity schema.
    #[error("unknown kind '{0}'")]
    UnknownKind(String),

    /// A persisted entry is missing or has a malformed identity field.
    #[error("invalid snapshot for '{key}': {reason}")]
    InvalidSnapshot {
        /// Store key of the offending entry.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Attribute is managed by the record itself.
    #[error("attribute {0} is read-only")]
    ReadOnly(String),

    /// Value could not be converted to the attribute's current type.
    #[error("value cannot be converted to {target}")]
    Coercion {
        /// The type the attribute already holds.
        target: ValueType,
    },
}

impl Error {
    /// Create an invalid snapshot error.
    pub fn invalid_snapshot(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
