use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::{ApiAppConfig, ErrorPolicyConfig, RawFormErrorPolicy};

/// Dispatcher application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DispatcherAppConfig {
    #[serde(default)]
    pub api: ApiAppConfig,
    #[serde(default)]
    pub errors: ErrorPolicyConfig,
}

impl DispatcherAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("IREMBO_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("api.base_url", "http://localhost:8000/api")?
            .set_default("errors.raw_form", "silent")?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., IREMBO__API__BASE_URL)
            .add_source(Environment::with_prefix("IREMBO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
