use super::forward;
use crate::connectors::Upstreams;
use crate::error::ApiError;
use crate::forms;
use crate::helpers::{password, JsonResponse, TokenClaims, TokenCodec};
use crate::middleware::BearerClaims;
use actix_web::{web, Responder};
use reqwest::Method;

#[tracing::instrument(name = "Auth service info.", skip_all)]
pub async fn hi(upstreams: web::Data<Upstreams>) -> Result<impl Responder, ApiError> {
    forward(upstreams.auth.client(), Method::GET, "/", None, None).await
}

#[tracing::instrument(name = "Register.", skip_all)]
pub async fn register(
    upstreams: web::Data<Upstreams>,
    body: web::Json<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let client = upstreams.auth.client();
    forward(client, Method::POST, "/register", None, Some(body.into_inner())).await
}

/// Login: checks the password against the stored hash and issues a bearer
/// token over `{id, email}`.
#[tracing::instrument(name = "Login.", skip(upstreams, codec, form), fields(email = %form.email))]
pub async fn token(
    upstreams: web::Data<Upstreams>,
    codec: web::Data<TokenCodec>,
    form: web::Json<forms::LoginForm>,
) -> Result<impl Responder, ApiError> {
    let form = forms::validated(form.into_inner())?;
    let credentials = upstreams.auth.fetch_credentials(&form.email).await?;

    if !password::verify_password(&form.password, &credentials.password_hash)? {
        tracing::warn!("wrong password for {}", credentials.email);
        return Err(ApiError::unauthorized("wrong password"));
    }

    let token = codec.issue(&TokenClaims::new(credentials.id, credentials.email))?;
    Ok(JsonResponse::ok(token).into_responder())
}

#[tracing::instrument(name = "Get profile.", skip(upstreams))]
pub async fn profile(
    caller: BearerClaims,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    let client = upstreams.auth.client();
    forward(client, Method::GET, "/user/me", Some(&caller), None).await
}

#[tracing::instrument(name = "Update profile.", skip(upstreams, body))]
pub async fn update_profile(
    caller: BearerClaims,
    upstreams: web::Data<Upstreams>,
    body: web::Json<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let client = upstreams.auth.client();
    forward(client, Method::PUT, "/user/me", Some(&caller), Some(body.into_inner())).await
}

#[tracing::instrument(name = "List users.", skip(upstreams))]
pub async fn list(
    caller: BearerClaims,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    forward(upstreams.auth.client(), Method::GET, "/user", Some(&caller), None).await
}

#[tracing::instrument(name = "Add user.", skip(upstreams, body))]
pub async fn add(
    caller: BearerClaims,
    upstreams: web::Data<Upstreams>,
    body: web::Json<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let client = upstreams.auth.client();
    forward(client, Method::POST, "/user", Some(&caller), Some(body.into_inner())).await
}

#[tracing::instrument(name = "Get user.", skip(upstreams))]
pub async fn item(
    caller: BearerClaims,
    path: web::Path<(i64,)>,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    let url = format!("/user/{}", path.0);
    forward(upstreams.auth.client(), Method::GET, &url, Some(&caller), None).await
}

#[tracing::instrument(name = "Update user.", skip(upstreams, body))]
pub async fn update(
    caller: BearerClaims,
    path: web::Path<(i64,)>,
    upstreams: web::Data<Upstreams>,
    body: web::Json<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let url = format!("/user/{}", path.0);
    let client = upstreams.auth.client();
    forward(client, Method::PUT, &url, Some(&caller), Some(body.into_inner())).await
}

#[tracing::instrument(name = "Delete user.", skip(upstreams))]
pub async fn delete(
    caller: BearerClaims,
    path: web::Path<(i64,)>,
    upstreams: web::Data<Upstreams>,
) -> Result<impl Responder, ApiError> {
    let url = format!("/user/{}", path.0);
    forward(upstreams.auth.client(), Method::DELETE, &url, Some(&caller), None).await
}
