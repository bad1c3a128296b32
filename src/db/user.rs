use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

const USER_COLUMNS: &str = "id, email, password, first_name, last_name, address, birth, is_admin, created_at, updated_at";

pub async fn fetch(pool: &PgPool, id: i64) -> Result<Option<models::User>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching the user by ID", user_id = id);
    sqlx::query_as::<_, models::User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<models::User>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching the user by email");
    sqlx::query_as::<_, models::User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::User>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching all users");
    sqlx::query_as::<_, models::User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
        .fetch_all(pool)
        .instrument(query_span)
        .await
}

/// Inserts a user and answers the id assigned by the database. A duplicate
/// email surfaces as a unique violation.
pub async fn insert(pool: &PgPool, user: &models::NewUser) -> Result<i64, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new user into the database");
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password, first_name, last_name, address, birth, is_admin, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING id
        "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.address)
    .bind(user.birth)
    .bind(user.is_admin)
    .fetch_one(pool)
    .instrument(query_span)
    .await?;

    tracing::info!("New user {} has been saved to the database", id);
    Ok(id)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &models::UserChanges,
) -> Result<Option<models::User>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating user in the database", user_id = id);
    sqlx::query_as::<_, models::User>(&format!(
        r#"
        UPDATE users
        SET
            email = COALESCE($2, email),
            password = COALESCE($3, password),
            first_name = COALESCE($4, first_name),
            last_name = COALESCE($5, last_name),
            address = COALESCE($6, address),
            birth = COALESCE($7, birth),
            is_admin = COALESCE($8, is_admin),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&changes.email)
    .bind(&changes.password_hash)
    .bind(&changes.first_name)
    .bind(&changes.last_name)
    .bind(&changes.address)
    .bind(changes.birth)
    .bind(changes.is_admin)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting user from the database", user_id = id);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected())
}
