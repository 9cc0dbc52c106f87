//! User service configuration.

use common::{parse_env, CacheConfig, DatabaseConfig, ServerConfig};
use domain::PasswordPolicy;

/// Prefix for service-specific environment variables
const ENV_PREFIX: &str = "USER_SERVICE";

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// HTTP bind address
    pub server: ServerConfig,
    /// Record store connection
    pub database: DatabaseConfig,
    /// Redis connection
    pub cache: CacheConfig,
    /// Password strength requirements
    pub password_policy: PasswordPolicy,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(ENV_PREFIX),
            database: DatabaseConfig::from_env(ENV_PREFIX),
            cache: CacheConfig::from_env(ENV_PREFIX),
            password_policy: password_policy_from_env(),
        }
    }
}

fn password_policy_from_env() -> PasswordPolicy {
    let defaults = PasswordPolicy::default();
    PasswordPolicy {
        min_length: parse_env("PASSWORD_MIN_LENGTH").unwrap_or(defaults.min_length),
        require_uppercase: parse_env("PASSWORD_REQUIRE_UPPERCASE")
            .unwrap_or(defaults.require_uppercase),
        require_lowercase: parse_env("PASSWORD_REQUIRE_LOWERCASE")
            .unwrap_or(defaults.require_lowercase),
        require_digit: parse_env("PASSWORD_REQUIRE_DIGIT").unwrap_or(defaults.require_digit),
        require_special: parse_env("PASSWORD_REQUIRE_SPECIAL")
            .unwrap_or(defaults.require_special),
    }
}
