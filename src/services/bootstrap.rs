use crate::db;
use crate::helpers::password;
use crate::models::{self, ADMIN_EMAIL, ADMIN_FIRST_NAME, ADMIN_PASSWORD};
use sqlx::PgPool;

/// Seeds the bootstrap administrator when it is absent. Answers its id.
#[tracing::instrument(name = "Ensure bootstrap administrator", skip(pool))]
pub async fn ensure_admin(pool: &PgPool) -> anyhow::Result<i64> {
    if let Some(admin) = db::user::fetch_by_email(pool, ADMIN_EMAIL).await? {
        tracing::info!("bootstrap administrator already present with id {}", admin.id);
        return Ok(admin.id);
    }

    let password_hash = password::hash_password(ADMIN_PASSWORD)
        .map_err(|err| anyhow::anyhow!("{}", err.rendered_message()))?;
    let admin = models::NewUser {
        email: ADMIN_EMAIL.to_string(),
        password_hash,
        first_name: ADMIN_FIRST_NAME.to_string(),
        last_name: String::new(),
        address: String::new(),
        birth: None,
        is_admin: true,
    };

    let id = db::user::insert(pool, &admin).await?;
    tracing::info!("bootstrap administrator created with id {}", id);
    Ok(id)
}
