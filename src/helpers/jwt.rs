use crate::configuration::JwtSettings;
use crate::error::ApiError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claim set carried by the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            exp: None,
        }
    }
}

/// HS256 issuer/verifier built once at startup from the configured secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: Option<i64>,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: Option<u64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.leeway = 0;
        let ttl_secs = ttl_secs.map(|ttl| ttl.min(i64::MAX as u64) as i64);
        if ttl_secs.is_some() {
            validation.required_spec_claims.insert("exp".to_string());
        }

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(&settings.secret, settings.ttl_secs)
    }

    /// Signs `claims`, stamping `exp` when a lifetime is configured.
    pub fn issue(&self, claims: &TokenClaims) -> Result<String, ApiError> {
        let mut claims = claims.clone();
        if let Some(ttl) = self.ttl_secs {
            claims.exp = Some(chrono::Utc::now().timestamp().saturating_add(ttl));
        }

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            tracing::error!("failed to sign token: {:?}", err);
            ApiError::internal("failed to issue token")
        })
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, ApiError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::warn!("bearer token rejected: {}", err);
                ApiError::unauthorized("token is unauthorized")
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Result<&str, ApiError> {
    let mut parts = authorization.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(ApiError::unauthorized("no token found")),
    }
}
