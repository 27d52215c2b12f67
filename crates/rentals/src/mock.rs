//! `MockStore` — an in-memory test double for `RentalStore`.
//!
//! Records every call it receives so tests can assert that validation
//! failures never reach the datastore.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use db::models::{NewProperty, NewUser, Property, PropertyListing, ReservationListing, User};
use db::query::FilterCriteria;
use db::DbError;

use crate::RentalStore;

/// A recorded store call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UserByEmail(String),
    UserById(i32),
    InsertUser(NewUser),
    Reservations { guest_id: i32, limit: i64 },
    Properties { criteria: FilterCriteria, limit: i64 },
    InsertProperty(NewProperty),
}

/// In-memory store holding users and properties.
#[derive(Default)]
pub struct MockStore {
    pub users: Mutex<Vec<User>>,
    pub properties: Mutex<Vec<Property>>,
    /// Fail every call as if the pool had been closed.
    pub fail: bool,
    /// All calls seen by this store (in call order).
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl MockStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), DbError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl RentalStore for MockStore {
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        self.record(Call::UserByEmail(email.to_owned()))?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, DbError> {
        self.record(Call::UserById(id))?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError> {
        self.record(Call::InsertUser(user.clone()))?;
        let mut users = self.users.lock().unwrap();
        let created = User {
            id: users.len() as i32 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: i64,
    ) -> Result<Vec<ReservationListing>, DbError> {
        self.record(Call::Reservations { guest_id, limit })?;
        Ok(Vec::new())
    }

    async fn properties(
        &self,
        criteria: &FilterCriteria,
        limit: i64,
    ) -> Result<Vec<PropertyListing>, DbError> {
        self.record(Call::Properties { criteria: criteria.clone(), limit })?;
        let properties = self.properties.lock().unwrap();
        Ok(properties
            .iter()
            .take(limit as usize)
            .map(|p| PropertyListing { property: p.clone(), average_rating: None })
            .collect())
    }

    async fn insert_property(&self, property: &NewProperty) -> Result<Property, DbError> {
        self.record(Call::InsertProperty(property.clone()))?;
        let mut properties = self.properties.lock().unwrap();
        let created = Property {
            id: properties.len() as i32 + 1,
            owner_id: property.owner_id,
            title: property.title.clone(),
            description: property.description.clone(),
            thumbnail_photo_url: property.thumbnail_photo_url.clone(),
            cover_photo_url: property.cover_photo_url.clone(),
            cost_per_night: property.cost_per_night,
            parking_spaces: property.parking_spaces,
            number_of_bathrooms: property.number_of_bathrooms,
            number_of_bedrooms: property.number_of_bedrooms,
            country: property.country.clone(),
            street: property.street.clone(),
            city: property.city.clone(),
            province: property.province.clone(),
            post_code: property.post_code.clone(),
            active: property.active,
        };
        properties.push(created.clone());
        Ok(created)
    }
}
