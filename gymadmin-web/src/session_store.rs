//! Persisted session record: bearer token plus frozen user profile.
//!
//! Layout in the key/value backend:
//!
//! | key         | value                                                     |
//! |-------------|-----------------------------------------------------------|
//! | `authToken` | raw bearer token                                          |
//! | `user`      | `{"schemaVersion":1,"id":..,"username":..,"isAdmin":..}` |
//!
//! Both keys are written and removed together. Anything else found at load
//! time (one key alone, a profile that does not parse, an empty token) is
//! corruption: both keys are removed and the caller sees no session.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::{SessionUser, UserId};
use tracing::{debug, info, warn};

use crate::errors::{SessionError, StorageError};
use crate::storage::{BrowserStorage, SessionStorage};

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Key holding the JSON profile.
pub const USER_KEY: &str = "user";
/// Current version of the stored profile format.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Profile as written to storage. Version 0 means a record from before
/// versioning, which carried the same fields without `schemaVersion`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    #[serde(default)]
    schema_version: u32,
    id: UserId,
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    is_admin: bool,
}

impl StoredProfile {
    fn from_user(user: &SessionUser) -> Self {
        Self {
            schema_version: PROFILE_SCHEMA_VERSION,
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            is_admin: user.is_admin,
        }
    }

    fn into_user(self) -> SessionUser {
        SessionUser {
            id: self.id,
            username: self.username,
            name: self.name,
            is_admin: self.is_admin,
        }
    }
}

/// A session record read back from storage.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredSession {
    /// Bearer token.
    pub token: String,
    /// Frozen profile.
    pub user: SessionUser,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Sole owner of the persisted session record.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Store backed by the given key/value backend.
    ///
    /// # Arguments
    /// * `storage` - Backend holding the two session keys
    ///
    /// # Returns
    /// A new [`SessionStore`]. Clones share the backend.
    #[must_use]
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Store backed by `window.localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    /// Persist a session record.
    ///
    /// The profile is written first. If the token write then fails, both keys
    /// are removed so readers never see a half-written record. A record saved
    /// earlier is lost in that case, since its profile was already replaced.
    ///
    /// # Errors
    /// Returns [`SessionError`] when encoding or either write fails.
    pub fn save(&self, token: &str, user: &SessionUser) -> Result<(), SessionError> {
        let profile = serde_json::to_string(&StoredProfile::from_user(user))?;
        self.storage.set(USER_KEY, &profile)?;

        if let Err(err) = self.storage.set(TOKEN_KEY, token) {
            warn!(error = %err, "token write failed, dropping the session record");
            self.clear();
            return Err(err.into());
        }

        debug!(user_id = user.id, "session record saved");
        Ok(())
    }

    /// Read the session record.
    ///
    /// Returns `None` when there is no record, when the backend cannot be
    /// read, or when the record is corrupt. Corrupt records are cleared.
    #[must_use]
    pub fn load(&self) -> Option<StoredSession> {
        let (token, profile) = match (self.read(TOKEN_KEY), self.read(USER_KEY)) {
            (Ok(token), Ok(profile)) => (token, profile),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "session storage unreadable, continuing without a session");
                return None;
            }
        };

        match (token, profile) {
            (None, None) => None,
            (Some(token), Some(profile)) => self.decode(token, &profile),
            (token, _) => {
                self.discard(if token.is_some() {
                    "token stored without profile"
                } else {
                    "profile stored without token"
                });
                None
            }
        }
    }

    /// Remove both keys. Idempotent; failures are logged, never returned.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(error = %err, key, "failed to remove session key");
            }
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get(key)
    }

    fn decode(&self, token: String, raw_profile: &str) -> Option<StoredSession> {
        if token.trim().is_empty() {
            self.discard("empty token");
            return None;
        }

        let profile: StoredProfile = match serde_json::from_str(raw_profile) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(error = %err, "stored profile does not parse");
                self.discard("unparseable profile");
                return None;
            }
        };

        match profile.schema_version {
            PROFILE_SCHEMA_VERSION => {}
            0 => self.migrate(&profile),
            version => {
                warn!(version, "stored profile has an unsupported schema version");
                self.discard("unsupported profile version");
                return None;
            }
        }

        Some(StoredSession {
            token,
            user: profile.into_user(),
        })
    }

    fn migrate(&self, legacy: &StoredProfile) {
        let upgraded = StoredProfile {
            schema_version: PROFILE_SCHEMA_VERSION,
            ..legacy.clone()
        };
        let written = serde_json::to_string(&upgraded)
            .map_err(SessionError::from)
            .and_then(|encoded| {
                self.storage
                    .set(USER_KEY, &encoded)
                    .map_err(SessionError::from)
            });
        match written {
            Ok(()) => info!(user_id = legacy.id, "migrated stored profile to current schema"),
            Err(err) => warn!(error = %err, "could not rewrite legacy profile, keeping it as is"),
        }
    }

    fn discard(&self, reason: &str) {
        warn!(reason, "discarding corrupt session record");
        self.clear();
    }
}
