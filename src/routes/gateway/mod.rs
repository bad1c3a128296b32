//! Public routes of the gateway.
//!
//! Login, registration and the info routes are anonymous. Every other route
//! is wrapped by [`BearerAuth`] route by route, so a wrong method answers 405
//! even without a token. The verified token is re-encoded as internal claims
//! and the request is forwarded to the owning service. Downstream
//! envelopes are passed through untouched, errors included.

mod auth;
mod book;

use crate::connectors::ServiceClient;
use crate::error::ApiError;
use crate::helpers::{JsonResponse, TokenCodec};
use crate::middleware::{BearerAuth, BearerClaims};
use actix_web::{web, Responder, Route};
use reqwest::Method;

pub async fn hi() -> impl Responder {
    super::welcome("API Gateway")
}

pub fn configure(cfg: &mut web::ServiceConfig, codec: TokenCodec) {
    let bearer = BearerAuth::new(codec);
    let protected = |route: Route| route.wrap(bearer.clone());
    let method_not_allowed = || web::to(super::method_not_allowed);

    cfg.service(
        web::resource("/")
            .route(web::get().to(hi))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/ping")
            .route(web::get().to(super::ping))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/auth")
            .route(web::get().to(auth::hi))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/auth/register")
            .route(web::post().to(auth::register))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/auth/token")
            .route(web::post().to(auth::token))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/auth/me")
            .route(protected(web::get().to(auth::profile)))
            .route(protected(web::put().to(auth::update_profile)))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/auth/user")
            .route(protected(web::get().to(auth::list)))
            .route(protected(web::post().to(auth::add)))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/auth/user/{id}")
            .route(protected(web::get().to(auth::item)))
            .route(protected(web::put().to(auth::update)))
            .route(protected(web::delete().to(auth::delete)))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/book/hi")
            .route(web::get().to(book::hi))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/book")
            .route(protected(web::get().to(book::list)))
            .route(protected(web::post().to(book::add)))
            .default_service(method_not_allowed()),
    )
    .service(
        web::resource("/book/{id}")
            .route(protected(web::get().to(book::item)))
            .route(protected(web::put().to(book::update)))
            .route(protected(web::delete().to(book::delete)))
            .default_service(method_not_allowed()),
    );
}

/// Sends the request downstream on behalf of `caller` and relays the envelope.
async fn forward(
    client: &ServiceClient,
    method: Method,
    path: &str,
    caller: Option<&BearerClaims>,
    body: Option<serde_json::Value>,
) -> Result<impl Responder, ApiError> {
    let claims = caller.map(BearerClaims::internal_claims);
    let envelope: JsonResponse = client
        .send(method, path, claims.as_ref(), body.as_ref())
        .await?;

    Ok(envelope.into_responder())
}
