//! Scripted command transport for driver tests
//!
//! Replies are registered per `(command, scenario)`. The active scenario
//! starts as [`NOMINAL`] and can be switched for every later dispatch, which
//! lets one test walk a driver through its success, authentication-failure and
//! operational-failure branches without a network.
//!
//! ```ignore
//! let transport = Arc::new(
//!     ScriptedTransport::new()
//!         .reply("dreamhost_ps-reboot", json!({"result": "success", "data": "reboot_scheduled"}))
//!         .reply_in("API_FAILURE", "dreamhost_ps-reboot", json!({"result": "error", "data": "no_such_ps"})),
//! );
//! transport.set_scenario("API_FAILURE");
//! ```

use crate::error::{ComputeError, Result};
use crate::transport::{Command, CommandTransport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scenario every command falls back to
pub const NOMINAL: &str = "nominal";

type Handler = Box<dyn Fn(&Command) -> Value + Send + Sync>;

/// Transport answering from a `(command, scenario)` table
pub struct ScriptedTransport {
    handlers: HashMap<(String, String), Handler>,
    scenario: Mutex<String>,
    sent: Mutex<Vec<Command>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            scenario: Mutex::new(NOMINAL.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Register a nominal handler
    pub fn on<F>(self, command: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Command) -> Value + Send + Sync + 'static,
    {
        self.on_in(NOMINAL, command, handler)
    }

    /// Register a handler for one scenario
    pub fn on_in<F>(
        mut self,
        scenario: impl Into<String>,
        command: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(&Command) -> Value + Send + Sync + 'static,
    {
        self.handlers
            .insert((command.into(), scenario.into()), Box::new(handler));
        self
    }

    /// Register a fixed nominal reply
    pub fn reply(self, command: impl Into<String>, body: Value) -> Self {
        self.on(command, move |_| body.clone())
    }

    /// Register a fixed reply for one scenario
    pub fn reply_in(
        self,
        scenario: impl Into<String>,
        command: impl Into<String>,
        body: Value,
    ) -> Self {
        self.on_in(scenario, command, move |_| body.clone())
    }

    /// Switch the scenario for every later dispatch
    pub fn set_scenario(&self, scenario: impl Into<String>) {
        *lock(&self.scenario) = scenario.into();
    }

    pub fn scenario(&self) -> String {
        lock(&self.scenario).clone()
    }

    /// Commands dispatched so far, oldest first
    pub fn sent(&self) -> Vec<Command> {
        lock(&self.sent).clone()
    }

    fn handler(&self, command: &str, scenario: &str) -> Option<&Handler> {
        self.handlers
            .get(&(command.to_string(), scenario.to_string()))
            .or_else(|| {
                self.handlers
                    .get(&(command.to_string(), NOMINAL.to_string()))
            })
    }
}

#[async_trait]
impl CommandTransport for ScriptedTransport {
    async fn dispatch(&self, command: &Command) -> Result<Value> {
        lock(&self.sent).push(command.clone());

        let scenario = self.scenario();
        let handler = self.handler(&command.name, &scenario).ok_or_else(|| {
            ComputeError::Transport(format!(
                "no scripted reply for {} in scenario {}",
                command.name, scenario
            ))
        })?;

        Ok(handler(command))
    }
}

// Recovers the guard after a handler panicked in another test thread.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
