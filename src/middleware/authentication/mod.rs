//! Bearer-token authentication on the gateway.
//!
//! Requests without a verifiable `Authorization: Bearer` token are answered
//! with a 401 envelope before any handler or downstream call runs. Verified
//! claims are stored in the request extensions for [`BearerClaims`].

mod extractor;
mod manager;
mod manager_middleware;

pub use extractor::*;
pub use manager::*;
pub use manager_middleware::*;
