use crate::{ConfigError, FromEnv, env_or_default, env_parse, env_required};

/// Message-broker connection parameters, consumed by the deployment's
/// publisher adapter.
#[derive(Clone, Debug)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl FromEnv for BrokerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("BROKER_HOST", "localhost"),
            port: env_parse("BROKER_PORT", 5672)?,
            username: env_required("BROKER_USER")?,
            password: env_required("BROKER_PASS")?,
        })
    }
}
