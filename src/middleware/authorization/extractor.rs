use crate::error::ApiError;
use crate::helpers::InternalClaims;
use crate::services::{Identity, IdentityResolver};
use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;

/// Decoded internal claims of the caller. No role check.
#[derive(Debug, Clone)]
pub struct Caller(pub InternalClaims);

impl FromRequest for Caller {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(caller_claims(req).map(Caller))
    }
}

fn caller_claims(req: &HttpRequest) -> Result<InternalClaims, ApiError> {
    req.extensions()
        .get::<InternalClaims>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("claims header is missing"))
}

/// Resolved caller that passed the administrator check.
#[derive(Debug, Clone)]
pub struct AdminCaller(pub Identity);

impl FromRequest for AdminCaller {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = caller_claims(req);
        let resolver = req
            .app_data::<web::Data<Arc<dyn IdentityResolver>>>()
            .map(|resolver| resolver.get_ref().clone());

        Box::pin(async move {
            let claims = claims?;
            let resolver = resolver.ok_or_else(|| {
                tracing::error!("identity resolver is not registered");
                ApiError::internal("identity resolver unavailable")
            })?;

            let identity = resolver.resolve(&claims).await?;
            if !identity.is_admin {
                tracing::warn!("caller {} is not an administrator", identity.email);
                return Err(ApiError::unauthorized("role not authorized"));
            }

            Ok(AdminCaller(identity))
        })
    }
}
