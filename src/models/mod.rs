mod book;
pub mod user;

pub use book::*;
pub use user::*;
