//! DreamHost API configuration

use fleetflow_compute::{ComputeError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.dreamhost.com/";

const API_KEY_VAR: &str = "DREAMHOST_API_KEY";
const ENDPOINT_VAR: &str = "DREAMHOST_API_ENDPOINT";

/// Credentials and endpoint of the DreamHost API
#[derive(Clone)]
pub struct DreamhostConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl DreamhostConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Create DreamhostConfig from environment variables
    ///
    /// `DREAMHOST_API_KEY` is required, `DREAMHOST_API_ENDPOINT` overrides
    /// the public endpoint.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ComputeError::InvalidConfig(format!("{} is not set", API_KEY_VAR)))?;

        let config = Self::new(api_key);
        Ok(match std::env::var(ENDPOINT_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => config.with_endpoint(endpoint),
            _ => config,
        })
    }
}

impl std::fmt::Debug for DreamhostConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DreamhostConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env() {
        temp_env::with_vars(
            [(API_KEY_VAR, Some("6SHU5P2HLDAYECUM")), (ENDPOINT_VAR, None)],
            || {
                let config = DreamhostConfig::from_env().unwrap();
                assert_eq!(config.api_key, "6SHU5P2HLDAYECUM");
                assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_endpoint_override() {
        temp_env::with_vars(
            [
                (API_KEY_VAR, Some("key")),
                (ENDPOINT_VAR, Some("http://127.0.0.1:8080/")),
            ],
            || {
                let config = DreamhostConfig::from_env().unwrap();
                assert_eq!(config.endpoint, "http://127.0.0.1:8080/");
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key() {
        temp_env::with_vars([(API_KEY_VAR, None::<&str>), (ENDPOINT_VAR, None)], || {
            let err = DreamhostConfig::from_env().unwrap_err();
            assert!(matches!(err, ComputeError::InvalidConfig(_)));
        });

        temp_env::with_var(API_KEY_VAR, Some("  "), || {
            assert!(DreamhostConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_debug_hides_key() {
        let config = DreamhostConfig::new("secret-key");
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
