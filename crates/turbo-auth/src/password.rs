//! Password strength policy.
//!
//! There is no credential store behind the mock login, so a password is
//! "correct" exactly when it satisfies this policy.

/// Password strength requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters.
    pub min_length: usize,
    /// Require at least one ASCII uppercase letter.
    pub require_upper: bool,
    /// Require at least one ASCII lowercase letter.
    pub require_lower: bool,
    /// Require at least one ASCII digit.
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_upper: true,
            require_lower: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicy {
    /// Check a password against the policy.
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        if password.chars().count() < self.min_length {
            return false;
        }

        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        (has_upper || !self.require_upper)
            && (has_lower || !self.require_lower)
            && (has_digit || !self.require_digit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_validation() {
        let policy = PasswordPolicy::default();
        assert!(policy.is_satisfied_by("Passw0rd"));
        assert!(policy.is_satisfied_by("Password123!"));
        assert!(!policy.is_satisfied_by("weak"));
        assert!(!policy.is_satisfied_by("Pass0rd"));
        assert!(!policy.is_satisfied_by("alllowercase1"));
        assert!(!policy.is_satisfied_by("ALLUPPERCASE1"));
        assert!(!policy.is_satisfied_by("NoNumbersHere"));
    }

    #[test]
    fn test_length_counts_characters() {
        let policy = PasswordPolicy::default();
        // Seven characters, more than eight bytes.
        assert!(!policy.is_satisfied_by("Pässwö1"));
        assert!(policy.is_satisfied_by("Pässwör1"));
    }

    #[test]
    fn test_letter_classes_are_ascii() {
        let policy = PasswordPolicy::default();
        assert!(!policy.is_satisfied_by("ÄÖÜäöü12"));
        assert!(!policy.is_satisfied_by("ÄÖÜabcd12"));
        assert!(!policy.is_satisfied_by("ABCäöü12"));
        assert!(policy.is_satisfied_by("Aäöüöäb1"));
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_upper: false,
            require_lower: true,
            require_digit: false,
        };
        assert!(policy.is_satisfied_by("abcd"));
        assert!(!policy.is_satisfied_by("ABCD"));
    }
}
