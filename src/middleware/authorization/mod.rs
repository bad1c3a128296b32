//! Internal-claims authorization for the auth and book services.
//!
//! Two gates run in sequence:
//!
//! 1. identity gate ([`ClaimsAuth`]): the `Claims` header must decode (and,
//!    when a secret is configured, carry a valid `Claims-Signature`);
//! 2. role gate ([`AdminCaller`]): privileged handlers resolve the caller
//!    through the injected [`IdentityResolver`](crate::services::IdentityResolver)
//!    and reject non-administrators.
//!
//! Self-service handlers take [`Caller`] and skip the role gate.

mod extractor;
mod manager;
mod manager_middleware;

pub use extractor::*;
pub use manager::*;
pub use manager_middleware::*;
