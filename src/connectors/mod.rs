//! HTTP clients for the internal services.
//!
//! The gateway and the book service never touch another service's storage;
//! they go through these clients, which attach the caller's internal claims
//! and translate the shared response envelope back into `ApiError`s.

pub mod auth_service;
pub mod service_client;

pub use auth_service::AuthServiceClient;
pub use service_client::ServiceClient;

/// Internal services the gateway fans out to.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub auth: AuthServiceClient,
    pub book: ServiceClient,
}
