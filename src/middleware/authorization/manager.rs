use super::ClaimsAuthMiddleware;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;

pub struct ClaimsAuth {
    secret: Option<Rc<str>>,
}

impl ClaimsAuth {
    /// `secret` set means unsigned claims are rejected.
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: secret.map(Rc::from),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ClaimsAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ClaimsAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ClaimsAuthMiddleware {
            service: Rc::new(RefCell::new(service)),
            secret: self.secret.clone(),
        }))
    }
}
