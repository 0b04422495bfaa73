//! Persistence outcomes other than success.

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure reported by a [`crate::DocumentStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{collection} document '{id}' not found")]
    NotFound { collection: String, id: String },

    #[error("document rejected: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[error("malformed document id '{id}'")]
    InvalidId { id: String },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(field: Option<&str>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
