//! Errors returned by the rentals interface.

use thiserror::Error;

/// Errors produced by [`crate::Rentals`] (validation + persistence).
#[derive(Debug, Error)]
pub enum RentalsError {
    // ------ Validation errors ------

    /// Caller input was rejected before any query was issued.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    // ------ Datastore errors ------

    /// Persistence error from the db crate, passed through unchanged.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}

impl RentalsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// `true` if the error was caused by caller input rather than the datastore.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
