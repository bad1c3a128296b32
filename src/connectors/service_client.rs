use crate::error::ApiError;
use crate::helpers::claims::{self, InternalClaims, CLAIMS_HEADER, CLAIMS_SIGNATURE_HEADER};
use crate::helpers::{status_text, JsonResponse};
use actix_web::http::StatusCode;
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::Instrument;

/// Request/response client bound to one internal service.
///
/// No retry and no timeout beyond the transport default: a downstream outage
/// reaches the original caller immediately.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    http_client: reqwest::Client,
    claims_secret: Option<String>,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>, claims_secret: Option<&str>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
            claims_secret: claims_secret.map(str::to_string),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and answers the downstream envelope.
    ///
    /// A non-success status becomes `ApiError::Upstream` with the downstream
    /// status and message; a body that is not an envelope keeps the status
    /// and gets a generic message.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        claims: Option<&InternalClaims>,
        body: Option<&serde_json::Value>,
    ) -> Result<JsonResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let span = tracing::info_span!("internal_service_request", method = %method, url = %url);

        let mut req = self
            .http_client
            .request(method, &url)
            .header(ACCEPT, "application/json");

        if let Some(claims) = claims {
            let encoded = claims.encode();
            if let Some(secret) = self.claims_secret.as_deref() {
                req = req.header(CLAIMS_SIGNATURE_HEADER, claims::sign(&encoded, secret));
            }
            req = req.header(CLAIMS_HEADER, encoded);
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().instrument(span).await?;
        let status = StatusCode::from_u16(resp.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let text = resp.text().await?;

        match serde_json::from_str::<JsonResponse>(&text) {
            Ok(envelope) if status.is_success() && envelope.success => Ok(envelope),
            Ok(envelope) => {
                let status = if status.is_success() {
                    StatusCode::from_u16(envelope.code).unwrap_or(StatusCode::BAD_GATEWAY)
                } else {
                    status
                };
                let message = if envelope.message.is_empty() {
                    format!("{}: request failed", status_text(status.as_u16()))
                } else {
                    envelope.message
                };
                tracing::warn!("{} answered {}: {}", url, status, message);
                Err(ApiError::Upstream { status, message })
            }
            Err(_) if status.is_success() => {
                tracing::error!("{} answered a body that is not an envelope: {}", url, text);
                Err(ApiError::bad_gateway("invalid response from service"))
            }
            Err(_) => {
                tracing::warn!("{} answered {} without an envelope", url, status);
                Err(ApiError::Upstream {
                    status,
                    message: format!("{}: request failed", status_text(status.as_u16())),
                })
            }
        }
    }

    /// [`send`](Self::send), then deserializes the envelope's `data`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        claims: Option<&InternalClaims>,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let envelope = self.send(method, path, claims, body).await?;
        let data = envelope.data.unwrap_or(serde_json::Value::Null);

        serde_json::from_value(data).map_err(|err| {
            tracing::error!("unexpected payload from {}{}: {:?}", self.base_url, path, err);
            ApiError::bad_gateway("invalid response from service")
        })
    }
}
