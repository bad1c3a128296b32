use crate::helpers::json::{status_text, JsonResponse};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Handler-level error. Every variant renders the JSON envelope with
/// `success: false` and a message prefixed by the status phrase.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
    /// A downstream service failed. The message is forwarded as the
    /// downstream rendered it, so it already carries its status phrase.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Transport-level failure talking to a downstream service.
    pub fn bad_gateway(reason: impl std::fmt::Display) -> Self {
        let status = StatusCode::BAD_GATEWAY;
        Self::Upstream {
            status,
            message: format!("{}: {}", status_text(status.as_u16()), reason),
        }
    }

    /// Message as it appears in the rendered envelope.
    pub fn rendered_message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => message.clone(),
            other => format!("{}: {}", status_text(other.status_code().as_u16()), other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(JsonResponse::error(status, self.rendered_message()))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict("email registered".to_string())
            }
            err => {
                tracing::error!("Failed to execute query: {:?}", err);
                Self::Internal("database error".to_string())
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("downstream request failed: {:?}", err);
        if err.is_timeout() || err.is_connect() {
            Self::bad_gateway("service unreachable")
        } else {
            Self::bad_gateway("failed to reach service")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn message_carries_status_phrase() {
        let err = ApiError::unauthorized("role not authorized");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.rendered_message(), "Unauthorized: role not authorized");

        let err = ApiError::Validation("bad body".to_string());
        assert_eq!(err.rendered_message(), "Error Rendering Response: bad body");
    }

    #[test]
    fn upstream_message_is_forwarded_verbatim() {
        let err = ApiError::Upstream {
            status: StatusCode::CONFLICT,
            message: "Conflict: email registered".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.rendered_message(), "Conflict: email registered");
    }

    #[test]
    fn transport_failure_is_bad_gateway() {
        let err = ApiError::bad_gateway("service unreachable");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.rendered_message(), "Bad Gateway: service unreachable");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn error_response_renders_envelope() {
        let response = ApiError::Conflict("email registered".to_string()).error_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 409);
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "Conflict: email registered");
    }
}
