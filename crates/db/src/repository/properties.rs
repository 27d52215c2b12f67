//! Property search and listing creation.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use tracing::{debug, instrument};

use crate::{
    DbError,
    models::{NewProperty, Property, PropertyListing},
    query::{build_property_query, FilterCriteria, QueryPlan, SqlParam},
};

/// Search properties matching `criteria`, cheapest first, at most `limit` rows.
#[instrument(skip(pool))]
pub async fn list_properties(
    pool: &PgPool,
    criteria: &FilterCriteria,
    limit: i64,
) -> Result<Vec<PropertyListing>, DbError> {
    let plan = build_property_query(criteria, limit);
    fetch_plan(pool, &plan).await
}

/// Run a prepared plan, binding its parameters in order.
pub async fn fetch_plan(pool: &PgPool, plan: &QueryPlan) -> Result<Vec<PropertyListing>, DbError> {
    debug!(sql = plan.sql(), params = plan.params().len(), "running property query");

    let query = plan
        .params()
        .iter()
        .fold(sqlx::query_as::<_, PropertyListing>(plan.sql()), bind_param);

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

fn bind_param<'q>(
    query: QueryAs<'q, Postgres, PropertyListing, PgArguments>,
    param: &SqlParam,
) -> QueryAs<'q, Postgres, PropertyListing, PgArguments> {
    match param {
        SqlParam::Text(value) => query.bind(value.clone()),
        SqlParam::Int(value) => query.bind(*value),
        SqlParam::BigInt(value) => query.bind(*value),
        SqlParam::Float(value) => query.bind(*value),
    }
}

/// Insert a new property listing and return the stored row.
#[instrument(skip(pool, property), fields(owner_id = property.owner_id))]
pub async fn create_property(pool: &PgPool, property: &NewProperty) -> Result<Property, DbError> {
    let row = sqlx::query_as::<_, Property>(
        r#"
        INSERT INTO properties
            (owner_id, title, description, thumbnail_photo_url, cover_photo_url,
             cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
             country, street, city, province, post_code, active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(property.owner_id)
    .bind(&property.title)
    .bind(&property.description)
    .bind(&property.thumbnail_photo_url)
    .bind(&property.cover_photo_url)
    .bind(property.cost_per_night)
    .bind(property.parking_spaces)
    .bind(property.number_of_bathrooms)
    .bind(property.number_of_bedrooms)
    .bind(&property.country)
    .bind(&property.street)
    .bind(&property.city)
    .bind(&property.province)
    .bind(&property.post_code)
    .bind(property.active)
    .fetch_one(pool)
    .await?;

    debug!(property_id = row.id, "property created");
    Ok(row)
}
