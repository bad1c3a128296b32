//! Identity resolution: from decoded internal claims to the caller's role.
//!
//! The auth service owns the `users` table and resolves locally; the book
//! service has no user table and asks the auth service over HTTP (see
//! [`crate::connectors::AuthServiceClient`]). Handlers only see the trait.

pub mod mock;

use crate::db;
use crate::error::ApiError;
use crate::helpers::InternalClaims;
use crate::models;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

impl From<models::User> for Identity {
    fn from(user: models::User) -> Self {
        Identity {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, claims: &InternalClaims) -> Result<Identity, ApiError>;
}

/// Looks the caller up by email in the local `users` table.
#[derive(Debug, Clone)]
pub struct LocalIdentityResolver {
    pool: PgPool,
}

impl LocalIdentityResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IdentityResolver for LocalIdentityResolver {
    async fn resolve(&self, claims: &InternalClaims) -> Result<Identity, ApiError> {
        // A missing caller is not a 404 here: the claims named someone who
        // should exist, so the lookup itself failed.
        match db::user::fetch_by_email(&self.pool, &claims.email).await {
            Ok(Some(user)) => Ok(user.into()),
            Ok(None) => {
                tracing::warn!("caller {} has no user record", claims.email);
                Err(ApiError::internal("user not found"))
            }
            Err(err) => {
                tracing::error!("Failed to resolve caller: {:?}", err);
                Err(ApiError::internal("failed to resolve user"))
            }
        }
    }
}
