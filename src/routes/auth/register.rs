use crate::db;
use crate::error::ApiError;
use crate::forms;
use crate::helpers::{password, JsonResponse};
use actix_web::{post, web, Responder};
use sqlx::PgPool;

/// Anonymous sign-up. The account is never an administrator.
#[tracing::instrument(name = "Register user.", skip(form, pg_pool))]
#[post("/register")]
pub async fn register(
    form: web::Json<forms::UserForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let form = forms::validated(form.into_inner())?;
    let id = create_user(pg_pool.get_ref(), form, false).await?;

    Ok(JsonResponse::ok(id).into_responder())
}

/// Duplicate check then insert. The two statements race under concurrent
/// sign-ups with one email; the unique index answers the loser with 409.
pub(super) async fn create_user(
    pool: &PgPool,
    form: forms::UserForm,
    is_admin: bool,
) -> Result<i64, ApiError> {
    if db::user::fetch_by_email(pool, &form.email).await?.is_some() {
        tracing::info!("email {} is already registered", form.email);
        return Err(ApiError::Conflict("email registered".to_string()));
    }

    let password_hash = password::hash_password(&form.password)?;
    let id = db::user::insert(pool, &form.into_new_user(password_hash, is_admin)).await?;

    Ok(id)
}
