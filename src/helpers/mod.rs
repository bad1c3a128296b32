pub mod claims;
pub mod db_pools;
pub mod json;
pub mod jwt;
pub mod password;

pub use claims::{InternalClaims, CLAIMS_HEADER, CLAIMS_SIGNATURE_HEADER};
pub use json::*;
pub use jwt::{TokenClaims, TokenCodec};
