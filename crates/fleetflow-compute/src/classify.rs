//! Failure classification for provider replies
//!
//! Authentication detection is an allow-list: a payload is an authentication
//! failure only if it matches one of the driver's declared markers. Anything
//! else is an operational failure.

use serde_json::Value;

/// Outcome of classifying a failure payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credentials were rejected. Fatal, raised to the caller.
    Authentication,
    /// Any other failure. Mutations report it as `false`.
    Operational,
}

/// Per-driver failure markers
#[derive(Debug, Clone, Copy)]
pub struct ErrorClassifier {
    auth_markers: &'static [&'static str],
    negative_markers: &'static [&'static str],
}

impl ErrorClassifier {
    pub const fn new(auth_markers: &'static [&'static str]) -> Self {
        Self {
            auth_markers,
            negative_markers: &[],
        }
    }

    /// Payload tokens that mean failure even inside a `success` envelope
    pub const fn with_negative_markers(mut self, markers: &'static [&'static str]) -> Self {
        self.negative_markers = markers;
        self
    }

    pub fn classify(&self, payload: &Value) -> FailureKind {
        match payload.as_str() {
            Some(token) if self.auth_markers.iter().any(|m| *m == token) => {
                FailureKind::Authentication
            }
            _ => FailureKind::Operational,
        }
    }

    /// Whether a `success` payload actually reports a failure
    pub fn is_negative_success(&self, payload: &Value) -> bool {
        payload
            .as_str()
            .is_some_and(|token| self.negative_markers.iter().any(|m| *m == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLASSIFIER: ErrorClassifier =
        ErrorClassifier::new(&["invalid_api_key"]).with_negative_markers(&["no_such_ps"]);

    #[test]
    fn test_auth_marker_is_authentication() {
        assert_eq!(
            CLASSIFIER.classify(&json!("invalid_api_key")),
            FailureKind::Authentication
        );
    }

    #[test]
    fn test_unknown_tokens_are_operational() {
        for payload in [
            json!("no_such_ps"),
            json!("internal_error_setting_size"),
            json!("INVALID_API_KEY"),
            json!("invalid_api_key_and_more"),
            json!({"error": "invalid_api_key"}),
            json!(["invalid_api_key"]),
            json!(null),
        ] {
            assert_eq!(
                CLASSIFIER.classify(&payload),
                FailureKind::Operational,
                "{payload}"
            );
        }
    }

    #[test]
    fn test_negative_success_markers() {
        assert!(CLASSIFIER.is_negative_success(&json!("no_such_ps")));
        assert!(!CLASSIFIER.is_negative_success(&json!("reboot_scheduled")));
        assert!(!CLASSIFIER.is_negative_success(&json!({"memory-mb": "500"})));

        let plain = ErrorClassifier::new(&["invalid_api_key"]);
        assert!(!plain.is_negative_success(&json!("no_such_ps")));
    }
}
