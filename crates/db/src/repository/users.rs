//! User lookups and sign-up.

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::{
    DbError,
    models::{NewUser, User},
};

/// Fetch a single user by email address (case-insensitive).
///
/// Returns `None` if nobody has registered with that address.
#[instrument(skip(pool))]
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DbError> {
    let row = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, password FROM users WHERE lower(email) = lower($1)"#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    debug!(found = row.is_some(), "user lookup by email");
    Ok(row)
}

/// Fetch a single user by primary key.
#[instrument(skip(pool))]
pub async fn get_user_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, DbError> {
    let row = sqlx::query_as::<_, User>(
        r#"SELECT id, name, email, password FROM users WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert a new user and return it with its generated id.
#[instrument(skip(pool, user), fields(email = %user.email))]
pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<User, DbError> {
    let row = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .fetch_one(pool)
    .await?;

    debug!(user_id = row.id, "user created");
    Ok(row)
}
