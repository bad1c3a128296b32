//! Caller identity forwarded between internal services.
//!
//! The `Claims` header carries `base64("<id>*<email>")`. The value is not a
//! credential: internal services accept it only because the gateway is the
//! sole component reachable from outside and sets it after verifying the
//! bearer token. When a shared secret is configured, the sender also attaches
//! `Claims-Signature` (base64 HMAC-SHA256 of the header value) and receivers
//! reject claims without a valid signature.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const CLAIMS_HEADER: &str = "claims";
pub const CLAIMS_SIGNATURE_HEADER: &str = "claims-signature";
pub const SEPARATOR: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalClaims {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    #[error("claims header is missing")]
    Missing,
    #[error("claims are not valid base64")]
    Encoding,
    #[error("claims are malformed")]
    Malformed,
    #[error("claims signature is invalid")]
    Signature,
}

impl InternalClaims {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Claims used before a token exists, e.g. at login: only the email is known.
    pub fn for_email(email: impl Into<String>) -> Self {
        Self::new(0, email)
    }

    pub fn is_login_lookup(&self) -> bool {
        self.id == 0
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}{}{}", self.id, SEPARATOR, self.email))
    }

    /// Splits on the first separator: the id never contains one, the email may.
    pub fn decode(value: &str) -> Result<Self, ClaimsError> {
        let raw = STANDARD
            .decode(value.trim())
            .map_err(|_| ClaimsError::Encoding)?;
        let raw = String::from_utf8(raw).map_err(|_| ClaimsError::Encoding)?;

        let (id, email) = raw.split_once(SEPARATOR).ok_or(ClaimsError::Malformed)?;
        let id = id.parse::<i64>().map_err(|_| ClaimsError::Malformed)?;
        if email.is_empty() {
            return Err(ClaimsError::Malformed);
        }

        Ok(Self::new(id, email))
    }
}

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &str) -> HmacSha256 {
    match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("hmac key of any size is valid"),
    }
}

/// Signature for an encoded `Claims` header value.
pub fn sign(encoded: &str, secret: &str) -> String {
    let mut mac = mac_for(secret);
    mac.update(encoded.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Constant-time check of a `Claims-Signature` value.
pub fn verify_signature(encoded: &str, signature: &str, secret: &str) -> Result<(), ClaimsError> {
    let signature = STANDARD
        .decode(signature.trim())
        .map_err(|_| ClaimsError::Signature)?;
    let mut mac = mac_for(secret);
    mac.update(encoded.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| ClaimsError::Signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reverses_encode() {
        for (id, email) in [
            (1, "administrator@mail.com"),
            (0, "login@mail.com"),
            (42, "odd*name@mail.com"),
            (7, "ünïcode@mail.com"),
        ] {
            let claims = InternalClaims::new(id, email);
            assert_eq!(InternalClaims::decode(&claims.encode()), Ok(claims));
        }
    }

    #[test]
    fn encoding_matches_wire_format() {
        let claims = InternalClaims::new(0, "administrator@mail.com");
        assert_eq!(claims.encode(), STANDARD.encode("0*administrator@mail.com"));
    }

    #[test]
    fn missing_separator_is_rejected() {
        let value = STANDARD.encode("1administrator@mail.com");
        assert_eq!(InternalClaims::decode(&value), Err(ClaimsError::Malformed));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert_eq!(
            InternalClaims::decode("not base64!"),
            Err(ClaimsError::Encoding)
        );
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            InternalClaims::decode(&STANDARD.encode("1*")),
            Err(ClaimsError::Malformed)
        );
        assert_eq!(
            InternalClaims::decode(&STANDARD.encode("*a@b.c")),
            Err(ClaimsError::Malformed)
        );
        assert_eq!(InternalClaims::decode(""), Err(ClaimsError::Malformed));
    }

    #[test]
    fn signature_round_trip() {
        let encoded = InternalClaims::new(3, "user@mail.com").encode();
        let signature = sign(&encoded, "internal-secret");

        assert!(verify_signature(&encoded, &signature, "internal-secret").is_ok());
        assert_eq!(
            verify_signature(&encoded, &signature, "other-secret"),
            Err(ClaimsError::Signature)
        );

        let forged = InternalClaims::new(1, "administrator@mail.com").encode();
        assert_eq!(
            verify_signature(&forged, &signature, "internal-secret"),
            Err(ClaimsError::Signature)
        );
    }
}
