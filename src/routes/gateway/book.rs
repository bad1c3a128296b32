use super::forward;
use crate::connectors::Upstreams;
use crate::error::ApiError;
use crate::middleware::BearerClaims;
use actix_web::{web, Responder};
use reqwest::Method;

#[tracing::instrument(name = "Book service info.", skip_all)]
pub async fn hi(upstreams: web::Data<Upstreams>) -> Result<impl Responder, ApiError> {
    forward(&upstreams.book, Method::GET, "/", None, None).await
}

#[tracing::instrument(name = "List books.", skip(upstreams))]
pub async fn list(
    caller: BearerClaims,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    forward(&upstreams.book, Method::GET, "/book", Some(&caller), None).await
}

#[tracing::instrument(name = "Add book.", skip(upstreams, body))]
pub async fn add(
    caller: BearerClaims,
    upstreams: web::Data<Upstreams>,
    body: web::Json<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let body = Some(body.into_inner());
    forward(&upstreams.book, Method::POST, "/book", Some(&caller), body).await
}

#[tracing::instrument(name = "Get book.", skip(upstreams))]
pub async fn item(
    caller: BearerClaims,
    path: web::Path<(i64,)>,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    let url = format!("/book/{}", path.0);
    forward(&upstreams.book, Method::GET, &url, Some(&caller), None).await
}

#[tracing::instrument(name = "Update book.", skip(upstreams, body))]
pub async fn update(
    caller: BearerClaims,
    path: web::Path<(i64,)>,
    upstreams: web::Data<Upstreams>,
    body: web::Json<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let url = format!("/book/{}", path.0);
    let body = Some(body.into_inner());
    forward(&upstreams.book, Method::PUT, &url, Some(&caller), body).await
}

#[tracing::instrument(name = "Delete book.", skip(upstreams))]
pub async fn delete(
    caller: BearerClaims,
    path: web::Path<(i64,)>,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    let url = format!("/book/{}", path.0);
    forward(&upstreams.book, Method::DELETE, &url, Some(&caller), None).await
}
