use crate::models;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Registration and admin-create payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[validate(pattern = r"^[^@\s]+@[^@\s]+$")]
    #[validate(max_length = 255)]
    pub email: String,
    #[validate(min_length = 6)]
    #[validate(max_length = 128)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserForm {
    /// `is_admin` is decided by the caller: registration always passes `false`.
    pub fn into_new_user(self, password_hash: String, is_admin: bool) -> models::NewUser {
        models::NewUser {
            email: self.email,
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            birth: self.birth,
            is_admin,
        }
    }
}

/// Update payload; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateForm {
    #[validate(pattern = r"^[^@\s]+@[^@\s]+$")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(min_length = 6)]
    #[validate(max_length = 128)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl UserUpdateForm {
    /// Self-service updates never touch the administrator flag.
    pub fn into_changes(self, password_hash: Option<String>, allow_role_change: bool) -> models::UserChanges {
        models::UserChanges {
            email: self.email,
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            birth: self.birth,
            is_admin: self.is_admin.filter(|_| allow_role_change),
        }
    }
}
