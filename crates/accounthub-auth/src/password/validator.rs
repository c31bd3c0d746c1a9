//! Password policy enforcement for new passwords.

use accounthub_core::config::AuthConfig;
use accounthub_core::error::AppError;

/// Validates new passwords against the configured length bounds.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Maximum password length in characters.
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Returns `Ok(())` if the password length is within bounds.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();

        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("password123").is_ok());
        assert!(validator.validate("short").is_err());
        assert!(validator.validate(&"x".repeat(46)).is_err());
        assert!(validator.validate(&"x".repeat(45)).is_ok());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        // 8 characters, 16 bytes
        assert!(validator.validate("ääääääää").is_ok());
    }
}
