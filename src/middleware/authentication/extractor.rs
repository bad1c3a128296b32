use crate::error::ApiError;
use crate::helpers::{InternalClaims, TokenClaims};
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

/// Claims of the verified bearer token, as stored by [`super::BearerAuth`].
#[derive(Debug, Clone)]
pub struct BearerClaims(pub TokenClaims);

impl BearerClaims {
    /// Identity forwarded to internal services for this caller.
    pub fn internal_claims(&self) -> InternalClaims {
        InternalClaims::new(self.0.id, self.0.email.clone())
    }
}

impl FromRequest for BearerClaims {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<TokenClaims>()
            .cloned()
            .map(BearerClaims)
            .ok_or_else(|| ApiError::unauthorized("no token found"));

        ready(claims)
    }
}
