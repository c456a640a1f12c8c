//! # Session store tests
//!
//! Persistence round-trips, corruption clearing and the write-together rule.

#[cfg(test)]
mod tests {
    use crate::errors::{SessionError, StorageError};
    use crate::session_store::{PROFILE_SCHEMA_VERSION, SessionStore, TOKEN_KEY, USER_KEY};
    use crate::storage::{MemoryStorage, SessionStorage};
    use shared::models::SessionUser;

    fn admin() -> SessionUser {
        SessionUser {
            id: 1,
            username: "admin".to_string(),
            name: Some("Administrator".to_string()),
            is_admin: true,
        }
    }

    fn member() -> SessionUser {
        SessionUser {
            id: 42,
            username: "lucia".to_string(),
            name: None,
            is_admin: false,
        }
    }

    /// Backend that refuses writes to one key.
    #[derive(Debug, Clone)]
    struct RefusingStorage {
        inner: MemoryStorage,
        refused_key: &'static str,
    }

    impl SessionStorage for RefusingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.refused_key {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "QuotaExceededError".to_string(),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    /// Backend whose reads always fail.
    #[derive(Debug, Clone, Default)]
    struct UnreadableStorage {
        inner: MemoryStorage,
    }

    impl SessionStorage for UnreadableStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                reason: "SecurityError".to_string(),
            })
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let storage = MemoryStorage::new();
        SessionStore::new(storage.clone())
            .save("abc", &admin())
            .unwrap();

        let loaded = SessionStore::new(storage).load().unwrap();
        assert_eq!(loaded.token, "abc");
        assert_eq!(loaded.user, admin());
    }

    #[test]
    fn test_save_writes_canonical_layout() {
        let storage = MemoryStorage::new();
        SessionStore::new(storage.clone())
            .save("abc", &member())
            .unwrap();

        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        let profile: serde_json::Value =
            serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(
            profile,
            serde_json::json!({"schemaVersion": 1, "id": 42, "username": "lucia", "isAdmin": false})
        );
    }

    #[test]
    fn test_load_empty_storage_is_absent() {
        let storage = MemoryStorage::new();
        assert!(SessionStore::new(storage.clone()).load().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_malformed_profiles_are_cleared() {
        for malformed in [
            "not json",
            "{",
            "null",
            "[]",
            r#"{"username":"admin","isAdmin":true}"#,
            r#"{"id":"one","username":"admin","isAdmin":true}"#,
            r#"{"id":1,"username":"admin"}"#,
        ] {
            let storage = MemoryStorage::new();
            storage.set(TOKEN_KEY, "abc").unwrap();
            storage.set(USER_KEY, malformed).unwrap();

            assert!(
                SessionStore::new(storage.clone()).load().is_none(),
                "{malformed} should not load"
            );
            assert!(storage.keys().is_empty(), "{malformed} left keys behind");
        }
    }

    #[test]
    fn test_partial_records_are_cleared() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc").unwrap();
        assert!(SessionStore::new(storage.clone()).load().is_none());
        assert!(storage.is_empty());

        storage
            .set(USER_KEY, r#"{"schemaVersion":1,"id":1,"username":"admin","isAdmin":true}"#)
            .unwrap();
        assert!(SessionStore::new(storage.clone()).load().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_blank_token_is_corrupt() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.save("   ", &admin()).unwrap();
        assert!(store.load().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_legacy_profile_is_migrated() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "legacy-token").unwrap();
        storage
            .set(
                USER_KEY,
                r#"{"id":5,"username":"coach","name":"Coach","is_admin":false,"isAdmin":false}"#,
            )
            .unwrap();

        let loaded = SessionStore::new(storage.clone()).load().unwrap();
        assert_eq!(loaded.user.id, 5);
        assert_eq!(loaded.user.name.as_deref(), Some("Coach"));
        assert!(!loaded.user.is_admin);

        let rewritten: serde_json::Value =
            serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(rewritten["schemaVersion"], PROFILE_SCHEMA_VERSION);
    }

    #[test]
    fn test_future_schema_version_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc").unwrap();
        storage
            .set(USER_KEY, r#"{"schemaVersion":9,"id":1,"username":"admin","isAdmin":true}"#)
            .unwrap();

        assert!(SessionStore::new(storage.clone()).load().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.clear();
        store.save("abc", &admin()).unwrap();
        store.clear();
        store.clear();
        assert!(store.load().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_token_write_failure_rolls_back_profile() {
        let inner = MemoryStorage::new();
        let store = SessionStore::new(RefusingStorage {
            inner: inner.clone(),
            refused_key: TOKEN_KEY,
        });

        let err = store.save("abc", &admin()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Storage(StorageError::Write { ref key, .. }) if key == TOKEN_KEY
        ));
        assert!(inner.is_empty());
    }

    #[test]
    fn test_token_write_failure_over_existing_record_leaves_no_partial_record() {
        let inner = MemoryStorage::new();
        SessionStore::new(inner.clone())
            .save("old-token", &member())
            .unwrap();
        let store = SessionStore::new(RefusingStorage {
            inner: inner.clone(),
            refused_key: TOKEN_KEY,
        });

        assert!(store.save("abc", &admin()).is_err());
        assert_eq!(inner.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(inner.get(USER_KEY).unwrap(), None);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_profile_write_failure_writes_nothing() {
        let inner = MemoryStorage::new();
        let store = SessionStore::new(RefusingStorage {
            inner: inner.clone(),
            refused_key: USER_KEY,
        });

        assert!(store.save("abc", &admin()).is_err());
        assert!(inner.is_empty());
    }

    #[test]
    fn test_unreadable_storage_loads_nothing_and_keeps_data() {
        let storage = UnreadableStorage::default();
        storage.inner.set(TOKEN_KEY, "abc").unwrap();

        assert!(SessionStore::new(storage.clone()).load().is_none());
        assert_eq!(storage.inner.keys(), vec![TOKEN_KEY.to_string()]);
    }

    #[test]
    fn test_stored_session_debug_redacts_token() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage);
        store.save("super-secret", &admin()).unwrap();
        let debug = format!("{:?}", store.load().unwrap());
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
