//! Credential validation rules shared by sign-up and sign-in.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Usernames: 3-50 chars, alphanumerics plus `_` and `-`.
pub static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{3,50}$").unwrap()
});

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

/// Validate a username against the shared rule.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Username must be 3-50 characters and contain only letters, numbers, underscores, and hyphens".to_string(),
        ))
    }
}

/// Validate a password length. Content is unrestricted.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(CoreError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(CoreError::Validation(
            "Password must be at most 128 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_within_rules_pass() {
        assert!(validate_username("grower_42").is_ok());
        assert!(validate_username("a-b-c").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn usernames_outside_rules_fail() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("dot.dot").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"p".repeat(128)).is_ok());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }
}
