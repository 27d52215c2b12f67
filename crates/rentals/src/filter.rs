//! Property search input — run this before building a query.
//!
//! Search fields arrive as strings from a form or query string. Rules enforced:
//! 1. Blank fields are treated as absent; `city` is trimmed.
//! 2. Prices are finite, non-negative major-unit amounts, converted to cents
//!    here and nowhere else.
//! 3. A minimum price may not exceed the maximum price.
//! 4. Ratings lie in `0..=5`.
//! 5. Owner ids are positive integers.

use serde::Deserialize;

use db::models::Cents;
use db::query::{FilterCriteria, DEFAULT_LIMIT};

use crate::RentalsError;

const MAX_RATING: f64 = 5.0;

/// Raw property search parameters as submitted by a guest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub minimum_price_per_night: Option<String>,
    pub maximum_price_per_night: Option<String>,
    pub minimum_rating: Option<String>,
    pub owner_id: Option<String>,
}

impl PropertySearch {
    /// Validate every field and produce typed filter criteria.
    ///
    /// # Errors
    /// [`RentalsError::Validation`] naming the first offending field.
    pub fn criteria(&self) -> Result<FilterCriteria, RentalsError> {
        let minimum_price_per_night =
            parse_price("minimum_price_per_night", self.minimum_price_per_night.as_deref())?;
        let maximum_price_per_night =
            parse_price("maximum_price_per_night", self.maximum_price_per_night.as_deref())?;

        if let (Some(min), Some(max)) = (minimum_price_per_night, maximum_price_per_night) {
            if min > max {
                return Err(RentalsError::invalid(
                    "minimum_price_per_night",
                    format!("{min} is above the maximum of {max}"),
                ));
            }
        }

        Ok(FilterCriteria {
            city: present(self.city.as_deref()).map(str::to_owned),
            minimum_price_per_night,
            maximum_price_per_night,
            minimum_rating: parse_rating(self.minimum_rating.as_deref())?,
            owner_id: parse_id("owner_id", self.owner_id.as_deref())?,
        })
    }
}

/// Resolve the caller's requested result count, defaulting to
/// [`DEFAULT_LIMIT`].
pub fn resolve_limit(limit: Option<i64>) -> Result<i64, RentalsError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(n) if n > 0 => Ok(n),
        Some(n) => Err(RentalsError::invalid("limit", format!("{n} is not a positive integer"))),
    }
}

/// Parse a positive integer id.
pub(crate) fn parse_id(field: &'static str, raw: Option<&str>) -> Result<Option<i32>, RentalsError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(RentalsError::invalid(field, format!("'{raw}' is not a positive integer"))),
    }
}

fn parse_price(field: &'static str, raw: Option<&str>) -> Result<Option<Cents>, RentalsError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    let major = raw
        .parse::<f64>()
        .map_err(|_| RentalsError::invalid(field, format!("'{raw}' is not a number")))?;
    Cents::from_major(major)
        .map(Some)
        .ok_or_else(|| RentalsError::invalid(field, format!("'{raw}' is not a valid price")))
}

fn parse_rating(raw: Option<&str>) -> Result<Option<f64>, RentalsError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(rating) if (0.0..=MAX_RATING).contains(&rating) => Ok(Some(rating)),
        Ok(_) => Err(RentalsError::invalid(
            "minimum_rating",
            format!("'{raw}' is outside 0..={MAX_RATING}"),
        )),
        Err(_) => Err(RentalsError::invalid("minimum_rating", format!("'{raw}' is not a number"))),
    }
}

/// `None` for missing or whitespace-only input, otherwise the trimmed value.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
