use crate::db;
use crate::error::ApiError;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::AdminCaller;
use crate::models;
use actix_web::{delete, get, post, put, web, Responder};
use sqlx::PgPool;

#[tracing::instrument(name = "Get all books.", skip(pg_pool))]
#[get("")]
pub async fn list(
    _admin: AdminCaller,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let books = db::book::fetch_all(pg_pool.get_ref()).await?;
    Ok(JsonResponse::ok(books).into_responder())
}

#[tracing::instrument(name = "Get book.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item(
    _admin: AdminCaller,
    path: web::Path<(i64,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let id = path.0;
    let book = db::book::fetch(pg_pool.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("book not found".to_string()))?;

    Ok(JsonResponse::ok(book).into_responder())
}

#[tracing::instrument(name = "Add book.", skip(form, pg_pool))]
#[post("")]
pub async fn add(
    admin: AdminCaller,
    form: web::Json<forms::BookForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let form = forms::validated(form.into_inner())?;
    let id = db::book::insert(pg_pool.get_ref(), &form).await?;
    tracing::info!("book {} added by {}", id, admin.0.email);

    Ok(JsonResponse::ok(id).into_responder())
}

#[tracing::instrument(name = "Update book.", skip(form, pg_pool))]
#[put("/{id}")]
pub async fn update(
    _admin: AdminCaller,
    path: web::Path<(i64,)>,
    form: web::Json<forms::BookUpdateForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let id = path.0;
    let changes: models::BookChanges = forms::validated(form.into_inner())?.into();

    let book = db::book::update(pg_pool.get_ref(), id, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("book not found".to_string()))?;

    Ok(JsonResponse::ok(book).into_responder())
}

#[tracing::instrument(name = "Delete book.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn delete(
    _admin: AdminCaller,
    path: web::Path<(i64,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder, ApiError> {
    let id = path.0;
    let deleted = db::book::delete(pg_pool.get_ref(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("book not found".to_string()));
    }
    tracing::info!("book {} deleted", id);

    Ok(JsonResponse::ok(deleted).into_responder())
}
