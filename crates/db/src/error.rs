//! Typed error type for the db crate.

use thiserror::Error;

/// Failures surfaced by the pool, the repository functions and migrations.
///
/// Lookups that may legitimately find nothing return `Ok(None)` rather than
/// an error.
#[derive(Debug, Error)]
pub enum DbError {
    /// Driver, connection or constraint failure reported by sqlx.
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
