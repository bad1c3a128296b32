use crate::error::ApiError;
use crate::helpers::claims::{self, ClaimsError, InternalClaims};
use crate::helpers::{CLAIMS_HEADER, CLAIMS_SIGNATURE_HEADER};
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse},
    Error, HttpMessage, ResponseError,
};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::cell::RefCell;
use std::rc::Rc;

pub struct ClaimsAuthMiddleware<S> {
    pub service: Rc<RefCell<S>>,
    pub secret: Option<Rc<str>>,
}

impl<S, B> Service<ServiceRequest> for ClaimsAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if let Ok(mut service) = self.service.try_borrow_mut() {
            service.poll_ready(ctx)
        } else {
            Poll::Pending
        }
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let decoded = read_claims(&req, self.secret.as_deref());

        async move {
            match decoded {
                Ok(claims) => {
                    tracing::debug!("caller {} ({})", claims.id, claims.email);
                    req.extensions_mut().insert(claims);
                    let fut = service.borrow_mut().call(req);
                    fut.await.map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    tracing::warn!("{} {} rejected: {}", req.method(), req.path(), err);
                    let response = ApiError::unauthorized(err.to_string()).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        }
        .boxed_local()
    }
}

fn header<'a>(req: &'a ServiceRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

fn read_claims(req: &ServiceRequest, secret: Option<&str>) -> Result<InternalClaims, ClaimsError> {
    let encoded = header(req, CLAIMS_HEADER).ok_or(ClaimsError::Missing)?;

    if let Some(secret) = secret {
        let signature = header(req, CLAIMS_SIGNATURE_HEADER).ok_or(ClaimsError::Signature)?;
        claims::verify_signature(encoded.trim(), signature, secret)?;
    }

    InternalClaims::decode(encoded)
}
