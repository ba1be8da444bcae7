//! Password strength rules applied at registration

use std::collections::HashSet;

use crate::errors::ValidationError;

/// Password requirements. Defaults: at least 6 characters with a digit, a
/// lowercase letter, an uppercase letter and a non-alphanumeric character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub required_unique_chars: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            required_length: 6,
            required_unique_chars: 1,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// Every rule `password` breaks, in a stable order
    pub fn violations(&self, password: &str) -> Vec<String> {
        let mut violations = Vec::new();

        if password.chars().count() < self.required_length {
            violations.push(format!(
                "Passwords must be at least {} characters.",
                self.required_length
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(char::is_alphanumeric) {
            violations.push("Passwords must have at least one non alphanumeric character.".to_string());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            violations.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            violations.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
        }
        let unique = password.chars().collect::<HashSet<_>>().len();
        if unique < self.required_unique_chars {
            violations.push(format!(
                "Passwords must use at least {} different characters.",
                self.required_unique_chars
            ));
        }

        violations
    }

    pub fn check(&self, password: &str) -> Result<(), ValidationError> {
        let violations = self.violations(password);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::PasswordPolicy { violations })
        }
    }
}
