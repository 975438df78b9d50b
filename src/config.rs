use crate::payments::providers::AdyenConfig;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Prefix of the environment variables read by [`Config::from_env`],
/// e.g. `GATEWAY__ADYEN__API_KEY` or `GATEWAY__SERVER__PORT`.
pub const ENV_PREFIX: &str = "GATEWAY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub adyen: AdyenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::load(environment())
    }

    fn load(environment: ::config::Environment) -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.environment", "development")?
            .add_source(environment)
            .build()
            .context("failed to read configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.server.environment.as_str()) {
            return Err(anyhow!(
                "Environment must be one of: {:?}, got {}",
                valid_environments,
                self.server.environment
            ));
        }

        self.adyen
            .validate()
            .context("invalid Adyen configuration")?;

        Ok(())
    }
}
