//! Error body of the enrollment backend.

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-success statuses.
///
/// Handlers disagree on the field name: the login route answers with
/// `message`, the CRUD routes with `error`. Both are accepted.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Message used by the login handler.
    #[serde(default)]
    pub message: Option<String>,

    /// Message used by the resource handlers.
    #[serde(default)]
    pub error: Option<String>,

    /// Explicit success flag, `false` on failures.
    #[serde(default)]
    pub success: Option<bool>,
}

impl ErrorResponse {
    /// Creates an error response carrying just a message.
    ///
    /// # Arguments
    /// * `message` - The error message
    ///
    /// # Returns
    /// A new [`ErrorResponse`] flagged as a failure, with no `error` field.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
            success: Some(false),
        }
    }

    /// The first non-blank reason the backend gave, `error` taking precedence.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .into_iter()
            .chain(self.message.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason().unwrap_or("unknown error"))
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_new() {
        let error = ErrorResponse::new("Invalid credentials");
        assert_eq!(error.reason(), Some("Invalid credentials"));
        assert_eq!(error.success, Some(false));
    }

    #[test]
    fn test_reason_prefers_error_field() {
        let error: ErrorResponse = serde_json::from_str(
            r#"{"error":"no available slots","message":"Conflict","success":false}"#,
        )
        .unwrap();
        assert_eq!(error.reason(), Some("no available slots"));
    }

    #[test]
    fn test_reason_skips_blank_fields() {
        let error: ErrorResponse =
            serde_json::from_str(r#"{"error":"  ","message":"Invalid credentials"}"#).unwrap();
        assert_eq!(error.reason(), Some("Invalid credentials"));
        assert_eq!(ErrorResponse::default().reason(), None);
    }

    #[test]
    fn test_display_uses_reason() {
        assert_eq!(ErrorResponse::new("boom").to_string(), "boom");
        assert_eq!(ErrorResponse::default().to_string(), "unknown error");
    }
}
