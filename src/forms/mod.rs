mod book;
mod login;
pub mod user;

pub use book::*;
pub use login::*;
pub use user::*;

use crate::error::ApiError;
use serde_valid::Validate;

/// Runs the payload's declared validations, answering 422 on failure.
pub fn validated<T: Validate>(form: T) -> Result<T, ApiError> {
    form.validate()
        .map_err(|errors| ApiError::Validation(errors.to_string()))?;
    Ok(form)
}
