//! Provider reply envelope
//!
//! Every provider reply reaches the core as `{"result": ..., "data": ...}`.
//! `result == "success"` carries the payload; anything else is a failure whose
//! payload goes to the [`ErrorClassifier`].

use crate::classify::{ErrorClassifier, FailureKind};
use crate::error::{ComputeError, MappingError, Result};
use serde_json::{Map, Value, json};

const RESULT_KEY: &str = "result";
const DATA_KEY: &str = "data";
const SUCCESS: &str = "success";
const ERROR: &str = "error";

/// A decoded reply envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    success: bool,
    data: Value,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn error(data: Value) -> Self {
        Self {
            success: false,
            data,
        }
    }

    /// Decode a raw reply.
    ///
    /// A success reply must carry `data`. A failure reply without `data` is
    /// still a failure, with a null payload.
    pub fn parse(raw: Value) -> std::result::Result<Self, MappingError> {
        let Value::Object(mut obj) = raw else {
            return Err(MappingError::NotAnObject);
        };

        let success = match obj.get(RESULT_KEY) {
            None => return Err(MappingError::MissingKey(RESULT_KEY)),
            Some(Value::String(result)) => result == SUCCESS,
            Some(_) => return Err(MappingError::InvalidResult),
        };

        let data = match obj.remove(DATA_KEY) {
            Some(data) => data,
            None if success => return Err(MappingError::MissingKey(DATA_KEY)),
            None => Value::Null,
        };

        Ok(Self { success, data })
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Re-encode to the wire shape
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(
            RESULT_KEY.to_string(),
            json!(if self.success { SUCCESS } else { ERROR }),
        );
        obj.insert(DATA_KEY.to_string(), self.data.clone());
        Value::Object(obj)
    }

    /// Payload of a successful reply, or the classified failure.
    ///
    /// For commands without a boolean outcome an operational failure becomes
    /// [`ComputeError::ApiError`]. That includes a success reply whose payload
    /// is a declared negative marker.
    pub fn into_payload(self, classifier: &ErrorClassifier) -> Result<Value> {
        if self.success {
            if classifier.is_negative_success(&self.data) {
                return Err(ComputeError::ApiError(describe(&self.data)));
            }
            return Ok(self.data);
        }
        Err(failure_error(classifier, &self.data))
    }

    /// Outcome of a mutating command.
    ///
    /// Operational failures, including success replies whose payload is a
    /// declared negative marker, are `Ok(false)`. Only authentication
    /// failures are raised.
    pub fn into_outcome(self, classifier: &ErrorClassifier) -> Result<bool> {
        if self.success {
            return Ok(!classifier.is_negative_success(&self.data));
        }
        match classifier.classify(&self.data) {
            FailureKind::Authentication => Err(failure_error(classifier, &self.data)),
            FailureKind::Operational => Ok(false),
        }
    }
}

fn failure_error(classifier: &ErrorClassifier, payload: &Value) -> ComputeError {
    let message = describe(payload);
    match classifier.classify(payload) {
        FailureKind::Authentication => ComputeError::AuthenticationFailed(message),
        FailureKind::Operational => ComputeError::ApiError(message),
    }
}

/// Short human-readable form of a payload
fn describe(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Null => "unknown problem".to_string(),
        other => other.to_string(),
    }
}
