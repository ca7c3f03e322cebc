//! DreamHost API HTTP transport
//!
//! Every command is a GET on the API endpoint with `key`, `cmd` and
//! `format=json` added to the command parameters.

use crate::config::DreamhostConfig;
use async_trait::async_trait;
use fleetflow_compute::{Command, CommandTransport, ComputeError, Result};
use reqwest::Url;
use serde_json::Value;

/// HTTP transport for the DreamHost API
pub struct DreamhostHttp {
    client: reqwest::Client,
    config: DreamhostConfig,
}

impl DreamhostHttp {
    pub fn new(config: DreamhostConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Request URL for a command
    pub fn url(&self, command: &Command) -> Result<Url> {
        let mut params: Vec<(&str, &str)> = vec![
            ("key", self.config.api_key.as_str()),
            ("format", "json"),
            ("cmd", command.name.as_str()),
        ];
        params.extend(
            command
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );

        Url::parse_with_params(&self.config.endpoint, &params).map_err(|e| {
            ComputeError::InvalidConfig(format!(
                "invalid endpoint {}: {}",
                self.config.endpoint, e
            ))
        })
    }
}

#[async_trait]
impl CommandTransport for DreamhostHttp {
    async fn dispatch(&self, command: &Command) -> Result<Value> {
        let url = self.url(command)?;

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| ComputeError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ComputeError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ComputeError::Transport(format!(
                "API Error ({}): {}",
                status, text
            )));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_carries_key_and_params() {
        let http = DreamhostHttp::new(DreamhostConfig::new("6SHU5P2HLDAYECUM"));
        let command = Command::new("dreamhost_ps-reboot").param("ps", "ps22174");

        let url = http.url(&command).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("api.dreamhost.com"));
        assert!(pairs.contains(&("key".to_string(), "6SHU5P2HLDAYECUM".to_string())));
        assert!(pairs.contains(&("format".to_string(), "json".to_string())));
        assert!(pairs.contains(&("cmd".to_string(), "dreamhost_ps-reboot".to_string())));
        assert!(pairs.contains(&("ps".to_string(), "ps22174".to_string())));
    }

    #[test]
    fn test_invalid_endpoint() {
        let http =
            DreamhostHttp::new(DreamhostConfig::new("key").with_endpoint("not a url"));
        let err = http.url(&Command::new("dreamhost_ps-list_ps")).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidConfig(_)));
    }
}
