use super::{Identity, IdentityResolver};
use crate::error::ApiError;
use crate::helpers::InternalClaims;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolver for tests: echoes the claims back with a fixed role, or fails.
pub struct MockIdentityResolver {
    is_admin: Option<bool>,
    calls: AtomicUsize,
}

impl MockIdentityResolver {
    pub fn admin() -> Self {
        Self::with_role(Some(true))
    }

    pub fn member() -> Self {
        Self::with_role(Some(false))
    }

    /// Every lookup fails as if the user store were down.
    pub fn unavailable() -> Self {
        Self::with_role(None)
    }

    fn with_role(is_admin: Option<bool>) -> Self {
        Self {
            is_admin,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IdentityResolver for MockIdentityResolver {
    async fn resolve(&self, claims: &InternalClaims) -> Result<Identity, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.is_admin {
            Some(is_admin) => Ok(Identity {
                id: claims.id,
                email: claims.email.clone(),
                is_admin,
            }),
            None => Err(ApiError::internal("failed to resolve user")),
        }
    }
}
