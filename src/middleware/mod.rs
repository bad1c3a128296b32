pub mod authentication;
pub mod authorization;

pub use authentication::{BearerAuth, BearerClaims};
pub use authorization::{AdminCaller, Caller, ClaimsAuth};
