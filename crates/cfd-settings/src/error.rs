//! Error types for settings operations.

use thiserror::Error;
use uuid::Uuid;

use crate::repository::ValidationErrors;
use crate::store::StoreError;

/// Errors surfaced by the configuration store adapter.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Referenced record id is absent.
    #[error("Record '{id}' not found")]
    NotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// One or more fields violate the schema; nothing was persisted.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// Underlying store failure, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SettingsError {
    /// Creates a not-found error.
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Returns the field-keyed validation messages, if this is a
    /// validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
