//! Command transport seam
//!
//! Drivers describe each provider call as a [`Command`] and hand it to a
//! [`CommandTransport`], which returns the raw reply envelope. Connection
//! handling, TLS and retries belong to the transport implementation.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One provider command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Provider command name (e.g., "dreamhost_ps-list_ps")
    pub name: String,

    /// Command parameters, passed to the provider as-is
    pub params: BTreeMap<String, String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for (key, value) in &self.params {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Sends commands to a provider
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Send one command and return the decoded reply body
    async fn dispatch(&self, command: &Command) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_params() {
        let command = Command::new("dreamhost_ps-set_size")
            .param("ps", "ps22174")
            .param("size", 400)
            .params([("movedata", "no")]);

        assert_eq!(command.get("ps"), Some("ps22174"));
        assert_eq!(command.get("size"), Some("400"));
        assert_eq!(command.get("movedata"), Some("no"));
        assert_eq!(command.get("type"), None);
        assert_eq!(
            command.to_string(),
            "dreamhost_ps-set_size movedata=no ps=ps22174 size=400"
        );
    }
}
