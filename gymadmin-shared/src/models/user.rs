//! User listing for administrators.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Row of the administrator user listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    /// Account id.
    #[serde(rename = "id_usuario")]
    pub id: UserId,

    /// Account name.
    pub username: String,

    /// Administrator flag as currently stored by the backend.
    #[serde(default)]
    pub is_admin: bool,

    /// Creation timestamp, backend formatted.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `/users` answers either `{"users": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserListResponse {
    /// Object-wrapped list.
    Wrapped {
        /// The users.
        users: Vec<UserSummary>,
    },
    /// Bare JSON array.
    Bare(Vec<UserSummary>),
}

impl UserListResponse {
    /// Flatten either shape into the list.
    #[must_use]
    pub fn into_vec(self) -> Vec<UserSummary> {
        match self {
            Self::Wrapped { users } | Self::Bare(users) => users,
        }
    }
}
