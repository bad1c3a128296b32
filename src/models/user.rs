use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ADMIN_EMAIL: &str = "administrator@mail.com";
pub const ADMIN_PASSWORD: &str = "Password.123";
pub const ADMIN_FIRST_NAME: &str = "Administrator";

/// Row of the `users` table. The password hash never leaves the auth service
/// through this type; see [`Credentials`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub birth: Option<DateTime<Utc>>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login material handed to the gateway by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

impl From<User> for Credentials {
    fn from(user: User) -> Self {
        Credentials {
            id: user.id,
            email: user.email,
            password_hash: user.password,
        }
    }
}

/// Fields of a user row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub birth: Option<DateTime<Utc>>,
    pub is_admin: bool,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub birth: Option<DateTime<Utc>>,
    pub is_admin: Option<bool>,
}
