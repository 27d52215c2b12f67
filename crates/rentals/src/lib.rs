//! `rentals` crate — the function-style interface of the LightBnB data layer.
//!
//! Route handlers call [`Rentals`]; it validates input and delegates to a
//! [`RentalStore`] backed by the `db` crate.

pub mod error;
pub mod filter;
pub mod service;
pub mod store;
pub mod validate;

pub use error::RentalsError;
pub use filter::PropertySearch;
pub use service::Rentals;
pub use store::RentalStore;
pub use validate::PropertyDraft;

#[cfg(test)]
mod mock;
