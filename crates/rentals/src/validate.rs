//! Checks applied to new users and new listings before they are inserted.

use serde::Deserialize;

use db::models::{Cents, NewProperty, NewUser};

use crate::RentalsError;

/// Validate and normalise a sign-up.
pub fn new_user(user: NewUser) -> Result<NewUser, RentalsError> {
    let name = required("name", &user.name)?;
    let email = required("email", &user.email)?;
    if !email.contains('@') {
        return Err(RentalsError::invalid("email", format!("'{email}' is not an email address")));
    }
    if user.password.trim().is_empty() {
        return Err(RentalsError::invalid("password", "must not be blank"));
    }

    Ok(NewUser {
        name: name.to_owned(),
        email: email.to_owned(),
        password: user.password,
    })
}

/// A property listing as an owner submits it, with the nightly price in major
/// currency units.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDraft {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: f64,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl PropertyDraft {
    /// Validate the draft and convert it to insertable column values.
    pub fn into_new_property(self) -> Result<NewProperty, RentalsError> {
        if self.owner_id <= 0 {
            return Err(RentalsError::invalid("owner_id", "must be a positive integer"));
        }
        let title = required("title", &self.title)?.to_owned();
        let cost_per_night = Cents::from_major(self.cost_per_night).ok_or_else(|| {
            RentalsError::invalid(
                "cost_per_night",
                format!("{} is not a valid price", self.cost_per_night),
            )
        })?;
        for (field, count) in [
            ("parking_spaces", self.parking_spaces),
            ("number_of_bathrooms", self.number_of_bathrooms),
            ("number_of_bedrooms", self.number_of_bedrooms),
        ] {
            if count < 0 {
                return Err(RentalsError::invalid(field, "must not be negative"));
            }
        }

        Ok(NewProperty {
            owner_id: self.owner_id,
            title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            thumbnail_photo_url: self.thumbnail_photo_url,
            cover_photo_url: self.cover_photo_url,
            cost_per_night,
            parking_spaces: self.parking_spaces,
            number_of_bathrooms: self.number_of_bathrooms,
            number_of_bedrooms: self.number_of_bedrooms,
            country: self.country,
            street: self.street,
            city: self.city,
            province: self.province,
            post_code: self.post_code,
            active: self.active,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RentalsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RentalsError::invalid(field, "must not be blank"));
    }
    Ok(trimmed)
}
