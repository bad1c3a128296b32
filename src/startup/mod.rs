//! One `run` per service. Each binds the already-open listener, injects the
//! service's state as `web::Data` and returns the server future.

pub mod auth;
pub mod book;
pub mod gateway;

use crate::routes;
use actix_web::web;

/// Malformed JSON bodies answer 422 with the usual envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(routes::json_error_handler)
}

/// Non-numeric ids answer 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(routes::path_error_handler)
}
