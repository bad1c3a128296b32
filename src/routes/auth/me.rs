use crate::db;
use crate::error::ApiError;
use crate::forms;
use crate::helpers::{password, JsonResponse};
use crate::middleware::Caller;
use crate::models;
use actix_web::{get, put, web, Responder};
use sqlx::PgPool;

#[tracing::instrument(name = "Get own profile.", skip(pg_pool))]
#[get("/me")]
pub async fn profile(
    caller: Caller,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let user = db::user::fetch_by_email(pg_pool.get_ref(), &caller.0.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(JsonResponse::ok(user).into_responder())
}

/// Self-service update by the id carried in the claims. The administrator
/// flag is ignored.
#[tracing::instrument(name = "Update own profile.", skip(form, pg_pool))]
#[put("/me")]
pub async fn update_profile(
    caller: Caller,
    form: web::Json<forms::UserUpdateForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let form = forms::validated(form.into_inner())?;
    let changes = user_changes(form, false)?;

    let user = db::user::update(pg_pool.get_ref(), caller.0.id, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(JsonResponse::ok(user).into_responder())
}

/// Login material for the gateway. Not routed by the gateway itself, and only
/// answered for login-time claims (id 0) so a signed-in user cannot read
/// their own hash.
#[tracing::instrument(name = "Get credentials.", skip(pg_pool))]
#[get("/credentials")]
pub async fn credentials(
    caller: Caller,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    if !caller.0.is_login_lookup() {
        return Err(ApiError::unauthorized("credentials are internal"));
    }
    let user = db::user::fetch_by_email(pg_pool.get_ref(), &caller.0.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(JsonResponse::ok(models::Credentials::from(user)).into_responder())
}

pub(super) fn user_changes(
    form: forms::UserUpdateForm,
    allow_role_change: bool,
) -> Result<models::UserChanges, ApiError> {
    let password_hash = form
        .password
        .as_deref()
        .map(password::hash_password)
        .transpose()?;

    Ok(form.into_changes(password_hash, allow_role_change))
}
