//! Compute driver error types

use thiserror::Error;

/// Compute driver errors
///
/// Operational failures of mutating commands (destroy, reboot, resize) are
/// not represented here: drivers report them as `Ok(false)`.
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The provider rejected the credentials. Surfaced identically by every
    /// operation and never retried.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Permanent capability gap of the provider.
    #[error("{provider} does not support {operation}")]
    Unsupported {
        provider: String,
        operation: &'static str,
    },

    /// Operational failure of a command that has no boolean outcome
    /// (listing, creation).
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComputeError {
    pub fn unsupported(provider: impl Into<String>, operation: &'static str) -> Self {
        Self::Unsupported {
            provider: provider.into(),
            operation,
        }
    }

    /// Whether the error means the credentials are bad
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the error is a permanent capability gap
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// A provider reply broke the envelope or record contract.
///
/// This points at a provider or driver bug, not a runtime condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("envelope is not a JSON object")]
    NotAnObject,

    #[error("envelope has no `{0}` key")]
    MissingKey(&'static str),

    #[error("envelope `result` is not a string")]
    InvalidResult,

    #[error("expected {expected} payload, got {found}")]
    UnexpectedPayload {
        expected: &'static str,
        found: String,
    },

    #[error("record has no `{0}` field")]
    MissingField(String),

    #[error("field `{field}` has an unexpected value: {value}")]
    InvalidField { field: String, value: String },

    /// Two record fields map to the same `extra` key.
    #[error("record field collides with mapped `extra` key `{0}`")]
    FieldCollision(String),
}

pub type Result<T> = std::result::Result<T, ComputeError>;
