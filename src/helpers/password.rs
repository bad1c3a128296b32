/// Password hashing and verification using Argon2id
use crate::error::ApiError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// PHC-formatted hash with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("password hashing failed: {}", err);
            ApiError::internal("password hashing failed")
        })
}

/// Constant-time comparison against a stored PHC hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|err| {
        tracing::error!("stored password hash is invalid: {}", err);
        ApiError::internal("invalid password hash")
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => {
            tracing::error!("password verification failed: {}", err);
            Err(ApiError::internal("password verification failed"))
        }
    }
}
