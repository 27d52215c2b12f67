//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No validation, no defaults — pure SQL.

pub mod users;
pub mod properties;
pub mod reservations;
