use super::me::user_changes;
use super::register_route::create_user;
use crate::db;
use crate::error::ApiError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::AdminCaller;
use actix_web::{delete, get, post, put, web, Responder};
use sqlx::PgPool;

#[tracing::instrument(name = "Get all users.", skip(pg_pool))]
#[get("")]
pub async fn list(
    _admin: AdminCaller,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let users = db::user::fetch_all(pg_pool.get_ref()).await?;
    Ok(JsonResponse::ok(users).into_responder())
}

#[tracing::instrument(name = "Add user.", skip(form, pg_pool))]
#[post("")]
pub async fn add(
    _admin: AdminCaller,
    form: web::Json<forms::UserForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let form = forms::validated(form.into_inner())?;
    let is_admin = form.is_admin;
    let id = create_user(pg_pool.get_ref(), form, is_admin).await?;

    Ok(JsonResponse::ok(id).into_responder())
}

#[tracing::instrument(name = "Get user.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item(
    _admin: AdminCaller,
    path: web::Path<(i64,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let id = path.0;
    let user = db::user::fetch(pg_pool.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(JsonResponse::ok(user).into_responder())
}

#[tracing::instrument(name = "Update user.", skip(form, pg_pool))]
#[put("/{id}")]
pub async fn update(
    _admin: AdminCaller,
    path: web::Path<(i64,)>,
    form: web::Json<forms::UserUpdateForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let id = path.0;
    let form = forms::validated(form.into_inner())?;
    let changes = user_changes(form, true)?;

    let user = db::user::update(pg_pool.get_ref(), id, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(JsonResponse::ok(user).into_responder())
}

#[tracing::instrument(name = "Delete user.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn delete(
    _admin: AdminCaller,
    path: web::Path<(i64,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let id = path.0;
    let deleted = db::user::delete(pg_pool.get_ref(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("user not found".to_string()));
    }
    tracing::info!("user {} deleted", id);

    Ok(JsonResponse::ok(deleted).into_responder())
}
