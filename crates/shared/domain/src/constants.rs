//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Credential Masking
// =============================================================================

/// Placeholder returned in place of a stored credential on every read path
pub const MASKED_PASSWORD: &str = "***";

// =============================================================================
// Password Policy Defaults
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Whether at least one uppercase letter is required
pub const PASSWORD_REQUIRE_UPPERCASE: bool = true;

/// Whether at least one lowercase letter is required
pub const PASSWORD_REQUIRE_LOWERCASE: bool = true;

/// Whether at least one ASCII digit is required
pub const PASSWORD_REQUIRE_DIGIT: bool = true;

/// Whether at least one non-alphanumeric character is required
pub const PASSWORD_REQUIRE_SPECIAL: bool = false;

// =============================================================================
// Validation Messages
// =============================================================================

/// Returned when the login field is empty
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";

/// Returned when the login is not a well-formed email address
pub const MSG_INVALID_EMAIL: &str = "Invalid email";

/// Returned when the password does not satisfy the policy
pub const MSG_INVALID_PASSWORD: &str = "Invalid password";
