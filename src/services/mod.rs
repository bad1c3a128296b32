pub mod bootstrap;
pub mod identity;

pub use bootstrap::ensure_admin;
pub use identity::{Identity, IdentityResolver, LocalIdentityResolver};
