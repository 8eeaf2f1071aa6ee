pub mod auth;
pub mod error;
pub mod password;
pub mod todos;
pub mod validation;

pub use error::ServiceError;
pub use password::PasswordHasher;
