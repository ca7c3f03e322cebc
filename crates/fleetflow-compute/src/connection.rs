//! Command execution shared by drivers

use crate::classify::ErrorClassifier;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::transport::{Command, CommandTransport};
use serde_json::Value;
use std::sync::Arc;

/// A transport paired with the driver's failure markers
#[derive(Clone)]
pub struct Connection {
    transport: Arc<dyn CommandTransport>,
    classifier: ErrorClassifier,
}

impl Connection {
    pub fn new(transport: Arc<dyn CommandTransport>, classifier: ErrorClassifier) -> Self {
        Self {
            transport,
            classifier,
        }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Send a command and decode its envelope
    pub async fn request(&self, command: &Command) -> Result<Envelope> {
        tracing::debug!("Running: {}", command);

        let raw = self.transport.dispatch(command).await?;
        let envelope = Envelope::parse(raw)?;

        if !envelope.is_success() {
            tracing::debug!("{} failed: {}", command.name, envelope.data());
        }
        Ok(envelope)
    }

    /// Payload of a command without a boolean outcome
    pub async fn payload(&self, command: &Command) -> Result<Value> {
        self.request(command).await?.into_payload(&self.classifier)
    }

    /// Outcome of a mutating command; operational failures are `false`
    pub async fn outcome(&self, command: &Command) -> Result<bool> {
        let envelope = self.request(command).await?;
        let data = envelope.data().clone();
        let done = envelope.into_outcome(&self.classifier)?;

        if !done {
            tracing::warn!("{} was not applied: {}", command.name, data);
        }
        Ok(done)
    }
}
