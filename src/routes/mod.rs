pub mod auth;
pub mod book;
mod fallback;
pub mod gateway;
mod health_checks;

pub use fallback::*;
pub use health_checks::*;
