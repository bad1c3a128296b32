use crate::error::ApiError;
use crate::helpers::jwt::extract_bearer_token;
use crate::helpers::{TokenClaims, TokenCodec};
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    Error, HttpMessage, ResponseError,
};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::cell::RefCell;
use std::rc::Rc;

pub struct BearerAuthMiddleware<S> {
    pub service: Rc<RefCell<S>>,
    pub codec: Rc<TokenCodec>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
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
        let verified = authenticate(&req, &self.codec);

        async move {
            match verified {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = service.borrow_mut().call(req);
                    fut.await.map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    tracing::warn!("{} {} rejected: {}", req.method(), req.path(), err);
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        }
        .boxed_local()
    }
}

#[tracing::instrument(name = "Authenticate bearer token", skip_all)]
fn authenticate(req: &ServiceRequest, codec: &TokenCodec) -> Result<TokenClaims, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("no token found"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("no token found"))?;

    let token = extract_bearer_token(authorization)?;
    codec.verify(token)
}
