//! The `RentalStore` trait — the persistence seam behind [`crate::Rentals`].

use async_trait::async_trait;

use db::models::{NewProperty, NewUser, Property, PropertyListing, ReservationListing, User};
use db::query::FilterCriteria;
use db::repository::{properties, reservations, users};
use db::{DbError, DbPool};

/// Datastore operations used by the rentals interface.
///
/// Implemented for [`DbPool`] by delegating to the `db` repository functions.
/// Every method receives already-validated input.
#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, DbError>;

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError>;

    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<ReservationListing>, DbError>;

    async fn properties(
        &self,
        criteria: &FilterCriteria,
        limit: i64,
    ) -> Result<Vec<PropertyListing>, DbError>;

    async fn insert_property(&self, property: &NewProperty) -> Result<Property, DbError>;
}

#[async_trait]
impl RentalStore for DbPool {
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        users::get_user_by_email(self, email).await
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, DbError> {
        users::get_user_by_id(self, id).await
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError> {
        users::create_user(self, user).await
    }

    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<ReservationListing>, DbError> {
        reservations::list_reservations_for_guest(self, guest_id, limit).await
    }

    async fn properties(
        &self,
        criteria: &FilterCriteria,
        limit: i64,
    ) -> Result<Vec<PropertyListing>, DbError> {
        properties::list_properties(self, criteria, limit).await
    }

    async fn insert_property(&self, property: &NewProperty) -> Result<Property, DbError> {
        properties::create_property(self, property).await
    }
}
