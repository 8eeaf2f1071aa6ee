use crate::services::validation::{FormField, ValidationError};
use crate::store::StoreError;

pub const INTERNAL_ERROR: &str = "Internal Server Error";
pub const LOGIN_ERROR: &str = "Incorrect username or password";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("{}", LOGIN_ERROR)]
    InvalidCredentials,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database connection unavailable: {0}")]
    ConnectionUnavailable(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Field an inline form error belongs to; `None` for errors that are not
    /// shown next to a form input.
    pub fn field(&self) -> Option<FormField> {
        match self {
            ServiceError::UserAlreadyExists => Some(FormField::Username),
            ServiceError::Validation(err) => Some(err.field()),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(name) => ServiceError::UserNotFound(name),
            StoreError::UserAlreadyExists(_) => ServiceError::UserAlreadyExists,
            StoreError::ConnectionUnavailable(detail) => ServiceError::ConnectionUnavailable(detail),
            StoreError::Query(detail) => ServiceError::Internal(detail),
        }
    }
}

impl From<bcrypt::BcryptError> for ServiceError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ServiceError::Internal(format!("password hashing failed: {}", err))
    }
}
