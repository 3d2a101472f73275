use std::time::Duration;

use crate::constants::BASE_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL, request paths are appended to it
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: format!("arlo-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig from environment variables
    ///
    /// Every variable is optional; unset ones keep their default.
    /// * `ARLO_BASE_URL`
    /// * `ARLO_USER_AGENT`
    /// * `ARLO_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("ARLO_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(user_agent) = lookup("ARLO_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Some(timeout) = lookup("ARLO_TIMEOUT_SECS") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: "ARLO_TIMEOUT_SECS".to_string(),
                    value: timeout.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    #[error("HTTP client configuration error: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "https://my.arlo.com/hmsweb");
        assert!(config.user_agent.starts_with("arlo-client/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("ARLO_BASE_URL", "http://localhost:9000"),
            ("ARLO_USER_AGENT", "test-agent"),
            ("ARLO_TIMEOUT_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_invalid_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[("ARLO_TIMEOUT_SECS", "soon")]));

        match result {
            Err(ConfigError::InvalidEnvVar { name, value }) => {
                assert_eq!(name, "ARLO_TIMEOUT_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("Expected InvalidEnvVar error, got {:?}", other),
        }
    }
}
