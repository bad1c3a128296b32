use super::BearerAuthMiddleware;
use crate::helpers::TokenCodec;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;

#[derive(Clone)]
pub struct BearerAuth {
    codec: Rc<TokenCodec>,
}

impl BearerAuth {
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            codec: Rc::new(codec),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(RefCell::new(service)),
            codec: self.codec.clone(),
        }))
    }
}
