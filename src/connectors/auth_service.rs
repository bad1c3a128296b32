use super::ServiceClient;
use crate::error::ApiError;
use crate::helpers::InternalClaims;
use crate::models;
use crate::services::identity::{Identity, IdentityResolver};
use reqwest::Method;

/// Typed calls into the auth service.
#[derive(Debug, Clone)]
pub struct AuthServiceClient {
    client: ServiceClient,
}

impl AuthServiceClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Login material for `email`. Only the email is known at this point, so
    /// the claims carry id 0.
    #[tracing::instrument(name = "Fetch credentials from the auth service", skip(self))]
    pub async fn fetch_credentials(&self, email: &str) -> Result<models::Credentials, ApiError> {
        let claims = InternalClaims::for_email(email);
        self.client
            .fetch(Method::GET, "/user/credentials", Some(&claims), None)
            .await
    }
}

#[async_trait::async_trait]
impl IdentityResolver for AuthServiceClient {
    async fn resolve(&self, claims: &InternalClaims) -> Result<Identity, ApiError> {
        let user: models::User = self
            .client
            .fetch(Method::GET, "/user/me", Some(claims), None)
            .await?;

        Ok(user.into())
    }
}
