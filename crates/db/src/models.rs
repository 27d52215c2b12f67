//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no validation.
//! Caller-facing input types and their checks live in the `rentals` crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// money
// ---------------------------------------------------------------------------

/// A non-negative amount in minor currency units (cents).
///
/// Prices are stored and compared in cents. Converting from the major units a
/// guest types into a form happens once, in [`Cents::from_major`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Cents(i32);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Wrap an amount that is already in cents.
    ///
    /// Returns `None` for negative amounts.
    pub fn new(cents: i32) -> Option<Self> {
        (cents >= 0).then_some(Self(cents))
    }

    /// Convert a major-unit amount (e.g. dollars) to cents, rounding to the
    /// nearest cent.
    ///
    /// Returns `None` if `major` is negative, not finite, or too large for the
    /// `cost_per_night` column.
    pub fn from_major(major: f64) -> Option<Self> {
        if !major.is_finite() || major < 0.0 {
            return None;
        }
        let cents = (major * 100.0).round();
        if cents > f64::from(i32::MAX) {
            return None;
        }
        Some(Self(cents as i32))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Column values for a user that does not exist yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// properties
// ---------------------------------------------------------------------------

/// A persisted property row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: Cents,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// Column values for a property that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: Cents,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// A property together with the average of its review ratings.
///
/// `average_rating` is `None` for a property nobody has reviewed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

// ---------------------------------------------------------------------------
// reservations
// ---------------------------------------------------------------------------

/// One of a guest's reservations, joined with the reserved property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReservationListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub average_rating: Option<f64>,
}
