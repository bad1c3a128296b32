use actix_web::{http::StatusCode, web, Responder};
use serde::{Deserialize, Serialize};

/// Envelope shared by every service: `{code, success, data, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T = serde_json::Value> {
    pub code: u16,
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn ok(data: T) -> Self {
        JsonResponse {
            code: StatusCode::OK.as_u16(),
            success: true,
            data: Some(data),
            message: String::new(),
        }
    }

    pub fn into_responder(self) -> impl Responder {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (web::Json(self), status)
    }
}

impl JsonResponse<serde_json::Value> {
    pub fn error(status: StatusCode, message: String) -> Self {
        JsonResponse {
            code: status.as_u16(),
            success: false,
            data: None,
            message,
        }
    }
}

/// Human-readable phrase prefixed to error messages.
pub fn status_text(code: u16) -> &'static str {
    match code {
        422 => "Error Rendering Response",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Server Unavailable",
        _ => "Unknown Error",
    }
}
