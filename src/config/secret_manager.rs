use std::fmt;
use std::sync::Arc;

use crate::config::{EnvironmentProvider, SecretConfig, SystemEnvironment};

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    pepper: String,
    refresh_token_secret: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::init_with_provider(Arc::new(SystemEnvironment))
    }

    /// Load and validate all secrets through the given environment provider
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init_with_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env_provider.as_ref(), &Self::jwt_config())?;
        let pepper = Self::load_secret(env_provider.as_ref(), &Self::pepper_config())?;
        let refresh_token_secret = Self::load_secret(env_provider.as_ref(), &Self::refresh_token_config())?;

        Ok(Self {
            jwt_secret,
            pepper,
            refresh_token_secret,
        })
    }

    fn jwt_config() -> SecretConfig {
        SecretConfig::env_var("JWT_SECRET").required(true).min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::env_var("PEPPER").required(true).min_length(16)
    }

    fn refresh_token_config() -> SecretConfig {
        SecretConfig::env_var("REFRESH_TOKEN_SECRET").required(true).min_length(32)
    }

    /// Get the JWT signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Get the pepper for password hashing
    pub fn pepper(&self) -> &str {
        &self.pepper
    }

    /// Get the HMAC key for refresh token hashes
    pub fn refresh_token_secret(&self) -> &str {
        &self.refresh_token_secret
    }

    /// Load a secret based on its configuration
    pub(crate) fn load_secret(env_provider: &dyn EnvironmentProvider, config: &SecretConfig) -> Result<String, SecretError> {
        let value = match env_provider.get_var(&config.env_var) {
            Some(v) => v,
            None if !config.required => return Ok(String::new()),
            None => {
                return Err(SecretError::Missing {
                    secret_name: config.env_var.clone(),
                });
            }
        };

        match config.min_length {
            Some(expected) if value.len() < expected => Err(SecretError::InvalidLength {
                secret_name: config.env_var.clone(),
                expected,
                actual: value.len(),
            }),
            _ => Ok(value),
        }
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("pepper", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 3 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "this-is-a-valid-jwt-secret-with-32-characters";
    const PEPPER: &str = "valid-pepper-16ch";
    const REFRESH: &str = "refresh-token-secret-at-least-32-chars";

    fn full_env() -> MockEnvironment {
        MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", JWT),
            ("PEPPER", PEPPER),
            ("REFRESH_TOKEN_SECRET", REFRESH),
        ])
    }

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let manager = SecretManager::init_with_provider(Arc::new(full_env())).unwrap();

        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.pepper(), PEPPER);
        assert_eq!(manager.refresh_token_secret(), REFRESH);
    }

    #[test]
    fn test_error_when_jwt_secret_missing() {
        let env = MockEnvironment::empty().with_vars(&[("PEPPER", PEPPER), ("REFRESH_TOKEN_SECRET", REFRESH)]);

        match SecretManager::init_with_provider(Arc::new(env)).unwrap_err() {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "JWT_SECRET"),
            _ => panic!("Expected Missing error"),
        }
    }

    #[test]
    fn test_error_when_refresh_secret_missing() {
        let env = MockEnvironment::empty().with_vars(&[("JWT_SECRET", JWT), ("PEPPER", PEPPER)]);

        match SecretManager::init_with_provider(Arc::new(env)).unwrap_err() {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "REFRESH_TOKEN_SECRET"),
            _ => panic!("Expected Missing error"),
        }
    }

    #[test]
    fn test_error_when_pepper_too_short() {
        let env = full_env().with_var("PEPPER", "short");

        match SecretManager::init_with_provider(Arc::new(env)).unwrap_err() {
            SecretError::InvalidLength { secret_name, expected, actual } => {
                assert_eq!(secret_name, "PEPPER");
                assert_eq!(expected, 16);
                assert_eq!(actual, 5);
            }
            _ => panic!("Expected InvalidLength error"),
        }
    }

    #[test]
    fn test_error_when_jwt_secret_too_short() {
        let env = full_env().with_var("JWT_SECRET", "short-secret");

        match SecretManager::init_with_provider(Arc::new(env)).unwrap_err() {
            SecretError::InvalidLength { secret_name, expected, actual } => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, 12);
            }
            _ => panic!("Expected InvalidLength error"),
        }
    }

    #[test]
    fn test_debug_trait_does_not_expose_secrets() {
        let manager = SecretManager::init_with_provider(Arc::new(full_env())).unwrap();
        let debug_output = format!("{:?}", manager);

        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains(JWT));
        assert!(!debug_output.contains(PEPPER));
        assert!(!debug_output.contains(REFRESH));
    }

    #[test]
    fn test_display_trait_shows_metadata_only() {
        let manager = SecretManager::init_with_provider(Arc::new(full_env())).unwrap();
        let display_output = format!("{}", manager);

        assert!(display_output.contains("secrets_loaded: 3"));
        assert!(!display_output.contains(JWT));
    }

    #[test]
    fn test_optional_secret_missing_is_empty() {
        let config = SecretConfig::env_var("OPTIONAL_SECRET").required(false);

        let value = SecretManager::load_secret(&MockEnvironment::empty(), &config).unwrap();
        assert_eq!(value, "");
    }
}
