// Registration input rules. Each check stops at the first broken rule.

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username should not contain space")]
    UsernameContainsSpace,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password length must be at least {}", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("Password length must be at most {}", MAX_PASSWORD_LEN)]
    PasswordTooLong,
    #[error("Password should contain at least one latin letter")]
    PasswordMissingLetter,
    #[error("Password should contain at least one digit")]
    PasswordMissingDigit,
    #[error("Password should not contain space")]
    PasswordContainsSpace,
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::UsernameContainsSpace => FormField::Username,
            _ => FormField::Password,
        }
    }
}

pub fn validate_username(name: &str) -> Result<(), ValidationError> {
    if contains_whitespace(name) {
        return Err(ValidationError::UsernameContainsSpace);
    }
    Ok(())
}

pub fn validate_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    // byte length, as stored
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooLong);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::PasswordMissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if contains_whitespace(password) {
        return Err(ValidationError::PasswordContainsSpace);
    }
    Ok(())
}

fn contains_whitespace(input: &str) -> bool {
    input.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_credentials() {
        assert_eq!(validate_username("alice_01"), Ok(()));
        assert_eq!(validate_password("password1", "password1"), Ok(()));
        assert_eq!(validate_password(&"a1".repeat(32), &"a1".repeat(32)), Ok(()));
    }

    #[test]
    fn username_with_whitespace_is_rejected() {
        assert_eq!(validate_username("al ice"), Err(ValidationError::UsernameContainsSpace));
        assert_eq!(validate_username("al\tice"), Err(ValidationError::UsernameContainsSpace));
        assert_eq!(ValidationError::UsernameContainsSpace.field(), FormField::Username);
    }

    #[test]
    fn mismatch_is_reported_first() {
        // also too short, but the mismatch wins
        assert_eq!(validate_password("short", "SHORT1"), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn length_bounds() {
        assert_eq!(validate_password("short1", "short1"), Err(ValidationError::PasswordTooShort));
        let long = format!("{}1", "a".repeat(64));
        assert_eq!(validate_password(&long, &long), Err(ValidationError::PasswordTooLong));
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password length must be at least 8"
        );
    }

    #[test]
    fn letter_digit_and_space_rules_in_order() {
        assert_eq!(validate_password("12345678", "12345678"), Err(ValidationError::PasswordMissingLetter));
        assert_eq!(validate_password("password", "password"), Err(ValidationError::PasswordMissingDigit));
        assert_eq!(validate_password("pass word1", "pass word1"), Err(ValidationError::PasswordContainsSpace));
        assert_eq!(ValidationError::PasswordMissingDigit.field(), FormField::Password);
    }

    #[test]
    fn non_latin_letters_do_not_count() {
        assert_eq!(validate_password("пароль1234", "пароль1234"), Err(ValidationError::PasswordMissingLetter));
    }
}
