use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hotel.db?mode=rwc";
pub const DEFAULT_ROLE_FETCH_TIMEOUT_MS: u64 = 5000;

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    role_fetch_timeout_ms: u64,
    cors_allow_origin: Option<String>,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        let role_timeout_spec = ConfigSpec::new(env_provider.clone())
            .env_override("ROLE_FETCH_TIMEOUT_MS")
            .default_value("5000")
            .validator(|value| ConfigSpec::validate_integer_range(value, 100, 60000));

        let cors_spec = ConfigSpec::new(env_provider)
            .env_override("CORS_ALLOW_ORIGIN")
            .min_length(1);

        let database_url = database_url_spec.load_value()?;
        let server_host = host_spec.load_value()?;
        let server_port = ConfigSpec::parse_port(&port_spec.load_value()?, "PORT")?;
        let role_fetch_timeout_ms =
            ConfigSpec::parse_integer(&role_timeout_spec.load_value()?, "ROLE_FETCH_TIMEOUT_MS")? as u64;
        let cors_allow_origin = cors_spec.load()?.map(|v| v.value);

        Ok(Self {
            database_url,
            server_host,
            server_port,
            role_fetch_timeout_ms,
            cors_allow_origin,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn role_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.role_fetch_timeout_ms)
    }

    /// `None` allows any origin
    pub fn cors_allow_origin(&self) -> Option<&str> {
        self.cors_allow_origin.as_deref()
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("role_fetch_timeout_ms", &self.role_fetch_timeout_ms)
            .field("cors_allow_origin", &self.cors_allow_origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;
    use std::collections::HashMap;

    fn create_test_env(vars: HashMap<String, String>) -> Arc<MockEnvironment> {
        Arc::new(MockEnvironment::new(vars))
    }

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let env_vars = HashMap::from([
            ("DATABASE_URL".to_string(), "sqlite://test.db".to_string()),
            ("HOST".to_string(), "127.0.0.1".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("ROLE_FETCH_TIMEOUT_MS".to_string(), "2500".to_string()),
            ("CORS_ALLOW_ORIGIN".to_string(), "https://hotel.example".to_string()),
        ]);
        let env_provider = create_test_env(env_vars);

        let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_host(), "127.0.0.1");
        assert_eq!(settings.server_port(), 8080);
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.role_fetch_timeout(), Duration::from_millis(2500));
        assert_eq!(settings.cors_allow_origin(), Some("https://hotel.example"));
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let env_provider = create_test_env(HashMap::new());

        let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.server_address(), "0.0.0.0:3000");
        assert_eq!(
            settings.role_fetch_timeout(),
            Duration::from_millis(DEFAULT_ROLE_FETCH_TIMEOUT_MS)
        );
        assert_eq!(settings.cors_allow_origin(), None);
    }

    #[test]
    fn test_bootstrap_settings_empty_database_url_fails_validation() {
        let env_vars = HashMap::from([("DATABASE_URL".to_string(), "".to_string())]);
        let env_provider = create_test_env(env_vars);

        let result = BootstrapSettings::from_env_provider(env_provider);

        match result.unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "DATABASE_URL");
                assert!(reason.contains("must be at least 1 characters long"));
            }
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_empty_host_fails_validation() {
        let env_vars = HashMap::from([("HOST".to_string(), "".to_string())]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "HOST");
                assert!(reason.contains("cannot be empty"));
            }
            other => panic!("Expected InvalidSetting for HOST, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_invalid_port() {
        let env_vars = HashMap::from([("PORT".to_string(), "not_a_number".to_string())]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("Expected port number between 1 and 65535"));
            }
            other => panic!("Expected InvalidSetting for PORT, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_zero_port() {
        let env_vars = HashMap::from([("PORT".to_string(), "0".to_string())]);
        let env_provider = create_test_env(env_vars);

        match BootstrapSettings::from_env_provider(env_provider).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("outside valid range"));
            }
            _ => panic!("Expected InvalidSetting error for zero PORT"),
        }
    }

    #[test]
    fn test_role_fetch_timeout_out_of_range() {
        for value in ["50", "60001", "soon"] {
            let env_vars = HashMap::from([("ROLE_FETCH_TIMEOUT_MS".to_string(), value.to_string())]);
            let env_provider = create_test_env(env_vars);

            match BootstrapSettings::from_env_provider(env_provider).unwrap_err() {
                ApplicationError::InvalidSetting { setting_name, .. } => {
                    assert_eq!(setting_name, "ROLE_FETCH_TIMEOUT_MS");
                }
                other => panic!("Expected InvalidSetting for {}, got: {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_role_fetch_timeout_boundaries_accepted() {
        for (value, expected) in [("100", 100), ("60000", 60000)] {
            let env_vars = HashMap::from([("ROLE_FETCH_TIMEOUT_MS".to_string(), value.to_string())]);
            let env_provider = create_test_env(env_vars);

            let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();
            assert_eq!(settings.role_fetch_timeout(), Duration::from_millis(expected));
        }
    }
}
