use log::{info, warn};

use super::error::ServiceError;
use super::password::PasswordHasher;
use super::validation::{validate_password, validate_username};
use crate::models::{RegisterForm, User};
use crate::store::Repository;

/// Checks a username/password pair. Unknown users and wrong passwords are
/// different errors; the page decides how much of that to reveal.
pub fn login_user(
    repo: &dyn Repository,
    hasher: &PasswordHasher,
    username: &str,
    password: &str,
) -> Result<User, ServiceError> {
    let user = repo.find_user_by_username(username)?;

    if !hasher.verify(password, &user.password_hash) {
        warn!("failed login for user {}", username);
        return Err(ServiceError::InvalidCredentials);
    }

    info!("user {} logged in", user.username);
    Ok(user)
}

/// Runs the registration checks (taken username, username format, password
/// rules) and stores the user with a hashed password.
pub fn register_user(
    repo: &dyn Repository,
    hasher: &PasswordHasher,
    form: &RegisterForm,
) -> Result<(), ServiceError> {
    if repo.user_exists(&form.username)? {
        return Err(ServiceError::UserAlreadyExists);
    }
    validate_username(&form.username)?;
    validate_password(&form.password, &form.confirm_password)?;

    let hashed_password = hasher.hash(&form.password)?;
    repo.create_user(&form.username, &hashed_password)?;

    info!("registered user {}", form.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::ValidationError;
    use crate::store::MemoryRepository;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    fn form(username: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn register_then_login() {
        let repo = MemoryRepository::new();
        register_user(&repo, &hasher(), &form("alice", "password1", "password1")).unwrap();

        let user = login_user(&repo, &hasher(), "alice", "password1").unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "password1");
    }

    #[test]
    fn second_registration_is_rejected() {
        let repo = MemoryRepository::new();
        register_user(&repo, &hasher(), &form("alice", "password1", "password1")).unwrap();
        let err = register_user(&repo, &hasher(), &form("alice", "password2", "password2")).unwrap_err();
        assert!(matches!(err, ServiceError::UserAlreadyExists));
        assert_eq!(err.to_string(), "User already exists");
    }

    #[test]
    fn existence_is_checked_before_format() {
        let repo = MemoryRepository::new();
        repo.create_user("bad name", "hash").unwrap();
        let err = register_user(&repo, &hasher(), &form("bad name", "x", "y")).unwrap_err();
        assert!(matches!(err, ServiceError::UserAlreadyExists));
    }

    #[test]
    fn username_format_is_checked_before_password() {
        let repo = MemoryRepository::new();
        let err = register_user(&repo, &hasher(), &form("bad name", "x", "y")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::UsernameContainsSpace)));
        assert!(!repo.user_exists("bad name").unwrap());
    }

    #[test]
    fn login_errors_are_distinguished() {
        let repo = MemoryRepository::new();
        register_user(&repo, &hasher(), &form("bob", "password1", "password1")).unwrap();

        let err = login_user(&repo, &hasher(), "alice", "password1").unwrap_err();
        assert_eq!(err.to_string(), "User alice not found");

        let err = login_user(&repo, &hasher(), "bob", "wrong-password1").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
        assert_eq!(err.to_string(), "Incorrect username or password");
    }
}
