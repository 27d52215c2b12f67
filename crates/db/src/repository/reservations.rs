//! Reservation listings.

use sqlx::PgPool;
use tracing::instrument;

use crate::{DbError, models::ReservationListing};

/// Return a guest's reservations joined with the reserved property and its
/// average review rating, earliest stay first.
#[instrument(skip(pool))]
pub async fn list_reservations_for_guest(
    pool: &PgPool,
    guest_id: i32,
    limit: i64,
) -> Result<Vec<ReservationListing>, DbError> {
    let rows = sqlx::query_as::<_, ReservationListing>(
        r#"
        SELECT properties.*,
               reservations.id AS reservation_id,
               reservations.start_date,
               reservations.end_date,
               AVG(rating)::float8 AS average_rating
        FROM reservations
        JOIN properties ON properties.id = reservations.property_id
        LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
        WHERE reservations.guest_id = $1
        GROUP BY properties.id, reservations.id
        ORDER BY reservations.start_date
        LIMIT $2
        "#,
    )
    .bind(guest_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
