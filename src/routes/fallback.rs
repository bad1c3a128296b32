use crate::error::ApiError;
use actix_web::{error, HttpRequest};

pub async fn not_found() -> Result<&'static str, ApiError> {
    Err(ApiError::NotFound("route not found".to_string()))
}

pub async fn method_not_allowed() -> Result<&'static str, ApiError> {
    Err(ApiError::MethodNotAllowed("method not allowed".to_string()))
}

pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("{} {}: invalid json body: {}", req.method(), req.path(), err);
    ApiError::Validation(err.to_string()).into()
}

pub fn path_error_handler(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("{}: invalid path parameter: {}", req.path(), err);
    ApiError::NotFound("record not found".to_string()).into()
}
