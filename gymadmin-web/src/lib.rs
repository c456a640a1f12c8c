#![cfg_attr(not(test), forbid(unsafe_code))]

//! # Console core
//!
//! Session persistence, the authenticated session manager, view gating and
//! the typed client the console views call. The yew shell in `main.rs`
//! constructs one [`auth::AuthSessionManager`] and hands it to every view.

pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod session_store;
pub mod storage;

#[cfg(test)]
mod session_store_test;

pub use access::{GateDecision, Section, ViewRequirement};
pub use api::ConsoleClient;
pub use auth::{AuthPhase, AuthSessionManager, RequestOptions, SessionSnapshot};
pub use config::ConsoleConfig;
pub use errors::{ApiError, AuthError, RequestError, SessionError, StorageError};
pub use session_store::{SessionStore, StoredSession};
pub use storage::{BrowserStorage, MemoryStorage, SessionStorage};
