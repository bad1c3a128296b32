use crate::helpers::JsonResponse;
use actix_web::{HttpResponse, Responder};

/// Heartbeat answered before any authentication.
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body(".")
}

pub fn welcome(service: &str) -> impl Responder {
    JsonResponse::ok(format!("Hi, Welcome to {} Version 1", service)).into_responder()
}
