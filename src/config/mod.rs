mod bootstrap_settings;
mod config_spec;
mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_config;
mod secret_manager;

pub use bootstrap_settings::{BootstrapSettings, DEFAULT_DATABASE_URL, DEFAULT_ROLE_FETCH_TIMEOUT_MS};
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{connect, init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ApplicationError;
pub use logging::{LoggingConfig, LoggingError, init_logging, init_logging_with};
pub use secret_config::SecretConfig;
pub use secret_manager::{SecretError, SecretManager};
