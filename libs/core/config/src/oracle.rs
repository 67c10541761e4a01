use crate::{ConfigError, FromEnv, env_required};

/// Base URL of the external user-identity service.
#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub base_url: String,
}

impl FromEnv for OracleConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_required("USER_SERVICE_URL")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env() {
        temp_env::with_var("USER_SERVICE_URL", Some("http://users.internal"), || {
            let config = OracleConfig::from_env().unwrap();
            assert_eq!(config.base_url, "http://users.internal");
        });
        temp_env::with_var_unset("USER_SERVICE_URL", || {
            assert!(OracleConfig::from_env().is_err());
        });
    }
}
