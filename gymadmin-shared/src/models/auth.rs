//! Login request and response, and the session profile derived from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backend identifier of a user account.
pub type UserId = i64;

/// Credentials posted to `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,

    /// Plain-text password; sent once, never stored.
    pub password: String,
}

impl LoginRequest {
    /// Build a request from a username/password pair.
    ///
    /// # Arguments
    /// * `username` - Account name
    /// * `password` - Plain-text password
    ///
    /// # Returns
    /// A new [`LoginRequest`] ready to post to `/login`.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body returned by `/login`, success or failure.
///
/// Every field is optional on the wire; [`LoginResponse::into_session`] is the
/// single place where presence is enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Human readable outcome from the backend.
    #[serde(default)]
    pub message: Option<String>,

    /// Explicit success flag.
    #[serde(default)]
    pub success: Option<bool>,

    /// The authenticated account, with the bearer token nested inside it.
    #[serde(default)]
    pub user: Option<LoginUser>,
}

/// The `user` object of a login response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginUser {
    /// Account id.
    #[serde(default)]
    pub id: Option<UserId>,

    /// Account name.
    #[serde(default)]
    pub username: Option<String>,

    /// Display name, when the account has one.
    #[serde(default)]
    pub name: Option<String>,

    /// Server-side administrator flag.
    #[serde(default)]
    pub is_admin: Option<bool>,

    /// Bearer token issued for this login.
    #[serde(default)]
    pub token: Option<String>,
}

/// Reasons a login body cannot be turned into a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResponseShapeError {
    /// No `user` object at all.
    #[error("login response has no user object")]
    MissingUser,
    /// The named field of `user` is absent.
    #[error("login response user is missing `{0}`")]
    MissingField(&'static str),
    /// The token is present but blank.
    #[error("login response carries an empty token")]
    EmptyToken,
}

/// The normalized profile of the logged-in account.
///
/// `is_admin` is captured once at login and never re-derived while the
/// session lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Account id.
    pub id: UserId,

    /// Account name.
    pub username: String,

    /// Display name, when known.
    pub name: Option<String>,

    /// Frozen administrator flag.
    pub is_admin: bool,
}

impl SessionUser {
    /// Name to show in the console header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

impl LoginResponse {
    /// Whether the backend flagged this body as a failure.
    #[must_use]
    pub fn is_explicit_failure(&self) -> bool {
        self.success == Some(false)
    }

    /// Split the body into the bearer token and the normalized profile.
    ///
    /// # Errors
    /// Returns [`ResponseShapeError`] when the user object, any required field,
    /// or a non-empty token is missing. Fields are never defaulted.
    pub fn into_session(self) -> Result<(String, SessionUser), ResponseShapeError> {
        let user = self.user.ok_or(ResponseShapeError::MissingUser)?;
        let id = user.id.ok_or(ResponseShapeError::MissingField("id"))?;
        let username = user
            .username
            .ok_or(ResponseShapeError::MissingField("username"))?;
        let is_admin = user
            .is_admin
            .ok_or(ResponseShapeError::MissingField("is_admin"))?;
        let token = user.token.ok_or(ResponseShapeError::MissingField("token"))?;
        if token.trim().is_empty() {
            return Err(ResponseShapeError::EmptyToken);
        }

        Ok((
            token,
            SessionUser {
                id,
                username,
                name: user.name,
                is_admin,
            },
        ))
    }
}
