//! Authenticated session manager.
//!
//! One [`AuthSessionManager`] is built by the application root and handed to
//! every view. It mirrors the persisted session in memory, is the only writer
//! of the [`SessionStore`], and is the only path protected calls go through.
//!
//! ```text
//!   Hydrating ──load ok──▶ Authenticated ◀──login ok──┐
//!       │                       │                     │
//!       └──no record──▶ Anonymous ◀──────logout───────┘
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{Either, select};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use shared::models::{ErrorResponse, LoginRequest, LoginResponse, SessionUser, UserId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::errors::{AuthError, RequestError};
use crate::session_store::SessionStore;

const LOGIN_PATH: &str = "/login";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Where the manager is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Persisted state not read yet.
    Hydrating,
    /// A user is logged in.
    Authenticated,
    /// Nobody is logged in.
    Anonymous,
}

/// Point-in-time view of the session, cheap to clone into UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Lifecycle phase.
    pub phase: AuthPhase,
    /// The logged-in user, set exactly when `phase` is `Authenticated`.
    pub user: Option<SessionUser>,
}

impl SessionSnapshot {
    /// Hydration still running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == AuthPhase::Hydrating
    }

    /// A user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// The frozen admin flag, false when nobody is logged in.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(|user| user.is_admin)
    }
}

/// Caller side of an authenticated request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    body: Option<String>,
    cancel: Option<CancellationToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    /// Options for the given method with no body.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
            cancel: None,
        }
    }

    /// `GET` with no body.
    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// `POST` with no body yet.
    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// `PUT` with no body yet.
    #[must_use]
    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    /// `DELETE` with no body.
    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Add a header. `Authorization` is always replaced by the session token.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send a raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Send `payload` encoded as JSON.
    ///
    /// # Errors
    /// Returns the encoder error when `payload` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(payload)?);
        Ok(self)
    }

    /// Abort the request when `token` is cancelled.
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }
}

struct SessionState {
    phase: AuthPhase,
    token: Option<String>,
    user: Option<SessionUser>,
}

impl SessionState {
    fn hydrating() -> Self {
        Self {
            phase: AuthPhase::Hydrating,
            token: None,
            user: None,
        }
    }

    fn authenticate(&mut self, token: String, user: SessionUser) {
        self.phase = AuthPhase::Authenticated;
        self.token = Some(token);
        self.user = Some(user);
    }

    fn reset(&mut self) {
        self.phase = AuthPhase::Anonymous;
        self.token = None;
        self.user = None;
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("phase", &self.phase)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

/// Single source of truth for "who is logged in right now".
///
/// Clones share the same in-memory state. Separate instances over the same
/// storage (one per browser tab) do not see each other's changes until they
/// are rebuilt.
#[derive(Debug, Clone)]
pub struct AuthSessionManager {
    store: SessionStore,
    http: Client,
    config: ConsoleConfig,
    state: Arc<Mutex<SessionState>>,
}

impl PartialEq for AuthSessionManager {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl AuthSessionManager {
    /// Build a manager and hydrate it synchronously from `store`.
    ///
    /// # Arguments
    /// * `store` - Persisted session record, read once here
    /// * `config` - Backend location and 401 behavior
    ///
    /// # Returns
    /// A manager already in `Authenticated` or `Anonymous`, never `Hydrating`.
    #[must_use]
    pub fn new(store: SessionStore, config: ConsoleConfig) -> Self {
        Self::with_client(store, config, Client::new())
    }

    /// Same as [`AuthSessionManager::new`] with a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(store: SessionStore, config: ConsoleConfig, http: Client) -> Self {
        let manager = Self {
            store,
            http,
            config,
            state: Arc::new(Mutex::new(SessionState::hydrating())),
        };
        manager.hydrate();
        manager
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn hydrate(&self) {
        let restored = self.store.load();
        let mut state = self.state();
        if let Some(session) = restored {
            info!(user_id = session.user.id, "session restored from storage");
            state.authenticate(session.token, session.user);
        } else {
            debug!("no stored session, starting anonymous");
            state.reset();
        }
    }

    /// The configuration this manager was built with.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.state().phase
    }

    /// Hydration has not finished.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase() == AuthPhase::Hydrating
    }

    /// A user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase() == AuthPhase::Authenticated
    }

    /// The logged-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.state().user.clone()
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            phase: state.phase,
            user: state.user.clone(),
        }
    }

    /// Log in against the backend and persist the resulting session.
    ///
    /// Nothing is written and the current state is kept when the backend
    /// rejects the credentials or answers with an unusable body.
    ///
    /// # Errors
    /// Returns [`AuthError`] on rejection, transport failure, a malformed
    /// response, or when the session cannot be persisted.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<SessionUser, AuthError> {
        let url = self.config.resolve_url(LOGIN_PATH);
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(credentials)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "login request failed");
                AuthError::Network(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorResponse>().await.unwrap_or_default();
            let message = rejection_message(status, body.reason());
            warn!(%status, username = %credentials.username, "login rejected");
            return Err(AuthError::Rejected { status, message });
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|err| AuthError::MalformedResponse(err.to_string()))?;
        if body.is_explicit_failure() {
            let message = rejection_message(StatusCode::UNAUTHORIZED, body.message.as_deref());
            warn!(%status, username = %credentials.username, "login flagged as failed");
            return Err(AuthError::Rejected { status, message });
        }

        let (token, user) = body
            .into_session()
            .map_err(|err| AuthError::MalformedResponse(err.to_string()))?;

        {
            let mut state = self.state();
            self.store.save(&token, &user)?;
            state.authenticate(token, user.clone());
        }
        info!(user_id = user.id, is_admin = user.is_admin, "login succeeded");
        Ok(user)
    }

    /// Drop the session, persisted and in memory. Never fails.
    pub fn logout(&self) {
        let mut state = self.state();
        self.store.clear();
        if let Some(user) = state.user.as_ref() {
            info!(user_id = user.id, "logged out");
        }
        state.reset();
    }

    /// Send a request carrying the in-memory bearer token.
    ///
    /// `Content-Type: application/json` is added unless the caller set one;
    /// `Authorization` always comes from the session. The response is returned
    /// as is, whatever its status.
    ///
    /// # Errors
    /// Returns [`RequestError`] when the request cannot be sent or is cancelled.
    pub async fn authenticated_request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response, RequestError> {
        let RequestOptions {
            method,
            headers: caller_headers,
            body,
            cancel,
        } = options;
        if cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(RequestError::Cancelled);
        }

        let sent_token = self.state().token.clone();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.extend(caller_headers);
        headers.remove(AUTHORIZATION);
        if let Some(token) = sent_token.as_deref() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| RequestError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!(url, "sending request without a session");
        }

        let mut request = self
            .http
            .request(method, self.config.resolve_url(url))
            .headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = match cancel {
            Some(cancel) => {
                let send = std::pin::pin!(request.send());
                let cancelled = std::pin::pin!(cancel.cancelled());
                match select(send, cancelled).await {
                    Either::Left((response, _)) => response?,
                    Either::Right(_) => return Err(RequestError::Cancelled),
                }
            }
            None => request.send().await?,
        };

        if response.status() == StatusCode::UNAUTHORIZED && self.config.logout_on_unauthorized {
            self.expire_session(sent_token.as_deref(), url);
        }

        Ok(response)
    }

    /// Drop the session the backend refused, unless a newer one replaced it
    /// while the request was in flight.
    fn expire_session(&self, sent_token: Option<&str>, url: &str) {
        let mut state = self.state();
        if state.token.as_deref() != sent_token {
            debug!(url, "401 answered a session that is no longer current");
            return;
        }
        warn!(url, "backend refused the session token, logging out");
        self.store.clear();
        state.reset();
    }

    /// Id of the logged-in user, falling back to storage when the in-memory
    /// mirror is empty.
    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        if let Some(user) = self.state().user.as_ref() {
            return Some(user.id);
        }
        self.store.load().map(|session| session.user.id)
    }

    /// The frozen admin flag, false when nobody is logged in.
    #[must_use]
    pub fn is_admin_user(&self) -> bool {
        self.snapshot().is_admin()
    }
}

fn rejection_message(status: StatusCode, reason: Option<&str>) -> String {
    match reason.map(str::trim).filter(|reason| !reason.is_empty()) {
        Some(reason) => reason.to_string(),
        None if status == StatusCode::UNAUTHORIZED => "Invalid credentials".to_string(),
        None => format!("Login failed: {status}"),
    }
}
