//! Password value object and strength policy.
//!
//! Plain-text passwords only pass through here: they are checked against a
//! [`PasswordPolicy`] and then hashed with Argon2. Nothing downstream ever
//! sees the plain text.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::{
    MIN_PASSWORD_LENGTH, PASSWORD_REQUIRE_DIGIT, PASSWORD_REQUIRE_LOWERCASE,
    PASSWORD_REQUIRE_SPECIAL, PASSWORD_REQUIRE_UPPERCASE,
};
use crate::error::{DomainError, DomainResult};

/// Strength requirements a plain-text password must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    /// Require at least one character that is neither a letter nor a digit
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: PASSWORD_REQUIRE_UPPERCASE,
            require_lowercase: PASSWORD_REQUIRE_LOWERCASE,
            require_digit: PASSWORD_REQUIRE_DIGIT,
            require_special: PASSWORD_REQUIRE_SPECIAL,
        }
    }
}

impl PasswordPolicy {
    /// Check a candidate against the policy.
    ///
    /// # Errors
    /// Returns [`DomainError::WeakCredential`] naming the first unmet rule.
    pub fn check(&self, candidate: &str) -> DomainResult<()> {
        if candidate.chars().count() < self.min_length {
            return Err(DomainError::weak_credential(format!(
                "must be at least {} characters",
                self.min_length
            )));
        }
        if self.require_uppercase && !candidate.chars().any(char::is_uppercase) {
            return Err(DomainError::weak_credential("must contain an uppercase letter"));
        }
        if self.require_lowercase && !candidate.chars().any(char::is_lowercase) {
            return Err(DomainError::weak_credential("must contain a lowercase letter"));
        }
        if self.require_digit && !candidate.chars().any(|c| c.is_ascii_digit()) {
            return Err(DomainError::weak_credential("must contain a digit"));
        }
        if self.require_special && candidate.chars().all(char::is_alphanumeric) {
            return Err(DomainError::weak_credential("must contain a special character"));
        }
        Ok(())
    }
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password after checking it against the default policy.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::with_policy(plain_text, &PasswordPolicy::default())
    }

    /// Hash a plain-text password after checking it against `policy`.
    ///
    /// # Errors
    /// Returns [`DomainError::WeakCredential`] if the policy rejects the
    /// candidate, or [`DomainError::Internal`] if hashing itself fails.
    pub fn with_policy(plain_text: &str, policy: &PasswordPolicy) -> DomainResult<Self> {
        policy.check(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
        assert_ne!(password.as_str(), plain);
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_short_password_is_weak() {
        let result = Password::new("123");
        assert!(matches!(result, Err(DomainError::WeakCredential(_))));
    }

    #[test]
    fn test_missing_character_classes() {
        let policy = PasswordPolicy::default();
        assert!(matches!(
            policy.check("alllowercase1"),
            Err(DomainError::WeakCredential(_))
        ));
        assert!(matches!(
            policy.check("ALLUPPERCASE1"),
            Err(DomainError::WeakCredential(_))
        ));
        assert!(matches!(
            policy.check("NoDigitsHere"),
            Err(DomainError::WeakCredential(_))
        ));
        assert!(policy.check("Abcdefg1").is_ok());
    }

    #[test]
    fn test_special_character_rule() {
        let policy = PasswordPolicy {
            require_special: true,
            ..PasswordPolicy::default()
        };
        assert!(policy.check("Password123").is_err());
        assert!(policy.check("Password123!").is_ok());
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 3,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: true,
            require_special: false,
        };
        assert!(Password::with_policy("123", &policy).is_ok());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("SecurePassword123!").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }
}
