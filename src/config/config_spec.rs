use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::ApplicationError;

/// Where a loaded setting came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Load a setting value with source tracking
    ///
    /// Environment variable wins, then the default. A required setting with
    /// neither is an error; an optional one yields `None`.
    pub fn load(&self) -> Result<Option<ConfigValue>, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value)?;
                return Ok(Some(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable { name: env_var.clone() },
                }));
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default)?;
            return Ok(Some(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            }));
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(None)
    }

    /// Load a setting that has a default, so a value always exists
    pub fn load_value(&self) -> Result<String, ApplicationError> {
        self.load()?.map(|v| v.value).ok_or_else(|| ApplicationError::InvalidSetting {
            setting_name: self.setting_name().to_string(),
            reason: "Required setting has no value from any source".to_string(),
        })
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: self.setting_name().to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    pub fn parse_integer(value: &str, setting_name: &str) -> Result<i64, ApplicationError> {
        value.trim().parse::<i64>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected integer, got '{}': {}", value, e),
        })
    }

    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value.trim().parse::<u16>().map_err(|e| ApplicationError::ParseError {
            setting_name: setting_name.to_string(),
            error: format!("Expected port number (1-65535), got '{}': {}", value, e),
        })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }
}

/// Validation functions usable with `validator`
impl ConfigSpec {
    pub fn validate_integer_range(value: &str, min: i64, max: i64) -> Result<(), String> {
        let parsed = value
            .parse::<i64>()
            .map_err(|_| format!("Expected integer between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Value {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value
            .parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a host address (IPv4, IPv6, or hostname)
    ///
    /// Format check only, no DNS resolution.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.contains(':') {
            if value.starts_with('[') && value.ends_with(']') {
                let ipv6_part = &value[1..value.len() - 1];
                if ipv6_part.is_empty() || !ipv6_part.contains(':') {
                    return Err("Invalid IPv6 address format".to_string());
                }
            }
            return Ok(());
        }

        if value.contains('.') {
            let parts: Vec<&str> = value.split('.').collect();
            if parts.len() == 4 && parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit())) {
                return Self::validate_ipv4_address(value);
            }
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }

    /// Validate an IPv4 address format (4 dot-separated integers 0-255)
    pub fn validate_ipv4_address(value: &str) -> Result<(), String> {
        let parts: Vec<&str> = value.split('.').collect();

        if parts.len() != 4 {
            return Err(format!(
                "IPv4 address must have exactly 4 parts separated by dots, got {}",
                parts.len()
            ));
        }

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(format!("IPv4 address part {} cannot be empty", i + 1));
            }

            if part.len() > 1 && part.starts_with('0') {
                return Err(format!("IPv4 address part {} cannot have leading zeros: '{}'", i + 1, part));
            }

            let octet = part
                .parse::<u16>()
                .map_err(|_| format!("IPv4 address part {} must be a number: '{}'", i + 1, part))?;

            if octet > 255 {
                return Err(format!("IPv4 address part {} must be between 0-255, got {}", i + 1, octet));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn spec(env: MockEnvironment) -> ConfigSpec {
        ConfigSpec::new(Arc::new(env))
    }

    #[test]
    fn test_env_value_wins_over_default() {
        let loaded = spec(MockEnvironment::empty().with_var("PORT", "8080"))
            .env_override("PORT")
            .default_value("3000")
            .load()
            .unwrap()
            .unwrap();

        assert_eq!(loaded.value, "8080");
        assert_eq!(
            loaded.source,
            ConfigValueSource::EnvironmentVariable { name: "PORT".to_string() }
        );
    }

    #[test]
    fn test_default_used_when_env_missing() {
        let loaded = spec(MockEnvironment::empty())
            .env_override("PORT")
            .default_value("3000")
            .load()
            .unwrap()
            .unwrap();

        assert_eq!(loaded.value, "3000");
        assert_eq!(loaded.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_optional_setting_without_value_is_none() {
        let loaded = spec(MockEnvironment::empty())
            .env_override("CORS_ALLOW_ORIGIN")
            .load()
            .unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn test_required_setting_without_value_fails() {
        let result = spec(MockEnvironment::empty())
            .env_override("JWT_SECRET")
            .required(true)
            .load();

        match result {
            Err(ApplicationError::InvalidSetting { setting_name, .. }) => assert_eq!(setting_name, "JWT_SECRET"),
            other => panic!("Expected InvalidSetting, got: {:?}", other),
        }
    }

    #[test]
    fn test_validate_integer_range() {
        assert!(ConfigSpec::validate_integer_range("5000", 100, 60000).is_ok());
        assert!(ConfigSpec::validate_integer_range("99", 100, 60000).is_err());
        assert!(ConfigSpec::validate_integer_range("abc", 100, 60000).is_err());
    }

    #[test]
    fn test_validate_host_address() {
        assert!(ConfigSpec::validate_host_address("0.0.0.0").is_ok());
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("[::1]").is_ok());
        assert!(ConfigSpec::validate_host_address("256.0.0.1").is_err());
        assert!(ConfigSpec::validate_host_address("my host").is_err());
        assert!(ConfigSpec::validate_host_address("").is_err());
    }

    #[test]
    fn test_parse_port_rejects_zero() {
        assert!(ConfigSpec::parse_port("0", "PORT").is_err());
        assert_eq!(ConfigSpec::parse_port(" 443 ", "PORT").unwrap(), 443);
    }
}
