//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, the property filter query
//! builder, and repository functions for every table in the LightBnB schema.
//! No input validation lives here; callers hand in already-typed values.

pub mod error;
pub mod pool;
pub mod query;
pub mod repository;
pub mod models;

pub use pool::{DbPool, PoolConfig};
pub use error::DbError;
pub use query::{build_property_query, FilterCriteria, QueryPlan, SqlParam};
