//! Error types for the console core.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the key/value backend holding the session record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// No backend to talk to, e.g. `localStorage` disabled.
    #[error("session storage is unavailable: {0}")]
    Unavailable(String),
    /// A read was refused.
    #[error("failed to read `{key}`: {reason}")]
    Read {
        /// Key being read.
        key: String,
        /// Backend's explanation.
        reason: String,
    },
    /// A write was refused, typically over quota.
    #[error("failed to write `{key}`: {reason}")]
    Write {
        /// Key being written.
        key: String,
        /// Backend's explanation.
        reason: String,
    },
    /// A removal was refused.
    #[error("failed to remove `{key}`: {reason}")]
    Remove {
        /// Key being removed.
        key: String,
        /// Backend's explanation.
        reason: String,
    },
}

/// Errors produced while persisting a session record.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend refused a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// The profile could not be serialized.
    #[error("profile encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Login failures. Each carries enough to render a message on the form.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the credentials.
    #[error("login rejected ({status}): {message}")]
    Rejected {
        /// Status the backend answered with.
        status: StatusCode,
        /// Message for the form.
        message: String,
    },
    /// The backend could not be reached.
    #[error("login request failed: {0}")]
    Network(#[source] reqwest::Error),
    /// A success status with a body that is not a usable session.
    #[error("malformed login response: {0}")]
    MalformedResponse(String),
    /// The session could not be written to storage.
    #[error("could not persist session: {0}")]
    Persist(#[from] SessionError),
}

impl AuthError {
    /// Text for the login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Network(_) => "Unable to connect to server".to_string(),
            Self::MalformedResponse(_) => "Unexpected response from server".to_string(),
            Self::Persist(_) => "Unable to save the session in this browser".to_string(),
        }
    }

    /// Status the backend answered with, if it answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::MalformedResponse(_) | Self::Persist(_) => None,
        }
    }
}

/// Failures of `authenticated_request` itself. HTTP statuses are not errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network or protocol failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The caller's cancellation token fired first.
    #[error("request cancelled")]
    Cancelled,
    /// The stored token holds bytes a header value cannot carry.
    #[error("session token cannot be sent as a header")]
    InvalidToken,
}

/// Failures of the typed console client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// Non-success status.
    #[error("{status}: {message}")]
    Status {
        /// Status the backend answered with.
        status: StatusCode,
        /// Backend's reason, or the canonical one.
        message: String,
    },
    /// Success status with a body of the wrong shape.
    #[error("response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    /// The request payload could not be serialized.
    #[error("request body could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    /// The endpoint URL could not be built.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    /// The call needs a logged-in user and there is none.
    #[error("no authenticated user")]
    NotAuthenticated,
    /// Refused locally: the action is reserved to administrators.
    #[error("administrator privileges required to {0}")]
    Forbidden(&'static str),
}

impl ApiError {
    /// Whether the backend refused the session token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}
