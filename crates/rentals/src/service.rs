//! The rentals interface consumed by HTTP route handlers.
//!
//! [`Rentals`] is the single entry point:
//! 1. Validates raw caller input (`crate::filter`, `crate::validate`).
//! 2. Delegates to a [`RentalStore`], by default the shared Postgres pool.
//! 3. Passes datastore errors back unchanged; nothing is retried.

use tracing::{debug, info, instrument};

use db::models::{NewUser, Property, PropertyListing, ReservationListing, User};
use db::pool::{close_pool, create_pool};
use db::{DbPool, PoolConfig};

use crate::filter::{resolve_limit, PropertySearch};
use crate::store::RentalStore;
use crate::validate::{self, PropertyDraft};
use crate::RentalsError;

/// Stateless facade over a [`RentalStore`].
///
/// Construct one per process and share it; every call is independent.
#[derive(Debug, Clone)]
pub struct Rentals<S = DbPool> {
    store: S,
}

impl Rentals<DbPool> {
    /// Open the process-wide connection pool.
    pub async fn connect(config: &PoolConfig) -> Result<Self, RentalsError> {
        let pool = create_pool(config).await?;
        Ok(Self::new(pool))
    }

    /// Close the connection pool. Call once on shutdown.
    pub async fn close(&self) {
        close_pool(&self.store).await;
    }
}

impl<S: RentalStore> Rentals<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a user by email address.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RentalsError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(RentalsError::invalid("email", "must not be blank"));
        }
        Ok(self.store.user_by_email(email).await?)
    }

    /// Look up a user by id.
    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>, RentalsError> {
        positive("id", id)?;
        Ok(self.store.user_by_id(id).await?)
    }

    /// Register a user and return it with its generated id.
    #[instrument(skip_all)]
    pub async fn create_user(&self, user: NewUser) -> Result<User, RentalsError> {
        let user = validate::new_user(user)?;
        let created = self.store.insert_user(&user).await?;
        info!(user_id = created.id, "user registered");
        Ok(created)
    }

    /// List a guest's reservations, earliest first. `limit` defaults to 10.
    pub async fn list_reservations_for_guest(
        &self,
        guest_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<ReservationListing>, RentalsError> {
        positive("guest_id", guest_id)?;
        let limit = resolve_limit(limit)?;
        Ok(self.store.reservations_for_guest(guest_id, limit).await?)
    }

    /// Search properties. `limit` defaults to 10.
    ///
    /// # Errors
    /// [`RentalsError::Validation`] for malformed search fields; no query is
    /// issued in that case.
    pub async fn list_properties(
        &self,
        search: &PropertySearch,
        limit: Option<i64>,
    ) -> Result<Vec<PropertyListing>, RentalsError> {
        let criteria = search.criteria()?;
        let limit = resolve_limit(limit)?;
        let rows = self.store.properties(&criteria, limit).await?;
        debug!(count = rows.len(), "property search complete");
        Ok(rows)
    }

    /// Publish a new listing.
    #[instrument(skip_all, fields(owner_id = draft.owner_id))]
    pub async fn create_property(&self, draft: PropertyDraft) -> Result<Property, RentalsError> {
        let property = draft.into_new_property()?;
        let created = self.store.insert_property(&property).await?;
        info!(property_id = created.id, "property listed");
        Ok(created)
    }
}

fn positive(field: &'static str, id: i32) -> Result<(), RentalsError> {
    if id <= 0 {
        return Err(RentalsError::invalid(field, format!("{id} is not a positive id")));
    }
    Ok(())
}
