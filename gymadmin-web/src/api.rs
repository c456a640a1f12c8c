//! Typed client for the enrollment backend.
//!
//! Every call goes through [`AuthSessionManager::authenticated_request`], so
//! the bearer token and header rules live in one place. Non-success statuses
//! are turned into [`ApiError::Status`] with the backend's own message.

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use shared::models::{
    Activity, ActivityListResponse, ActivityRequest, ActivityResponse, Enrollment,
    EnrollmentRequest, ErrorResponse, UserId, UserListResponse, UserSummary,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::auth::{AuthSessionManager, RequestOptions};
use crate::errors::ApiError;

const ACTIVITIES_PATH: &str = "/activities";
const ACTIVITY_SEARCH_PATH: &str = "/activities/search";
const ENROLLMENTS_PATH: &str = "/enrollments";
const USERS_PATH: &str = "/users";

/// Console client bound to one session manager.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    session: AuthSessionManager,
    cancel: Option<CancellationToken>,
}

impl PartialEq for ConsoleClient {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}

impl ConsoleClient {
    /// Client sending requests on behalf of `session`.
    ///
    /// # Arguments
    /// * `session` - Manager supplying the bearer token and admin flag
    ///
    /// # Returns
    /// A new [`ConsoleClient`] with no cancellation token attached.
    #[must_use]
    pub fn new(session: AuthSessionManager) -> Self {
        Self {
            session,
            cancel: None,
        }
    }

    /// Copy of this client whose requests abort when `token` is cancelled.
    #[must_use]
    pub fn cancel_on(&self, token: CancellationToken) -> Self {
        Self {
            session: self.session.clone(),
            cancel: Some(token),
        }
    }

    /// The session this client sends requests for.
    #[must_use]
    pub fn session(&self) -> &AuthSessionManager {
        &self.session
    }

    /// All activities.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let list: ActivityListResponse = self.fetch(ACTIVITIES_PATH, self.options_get()).await?;
        Ok(list.into_vec())
    }

    /// One activity by id.
    ///
    /// # Errors
    /// Returns [`ApiError::Status`] with `404` when the activity does not exist.
    pub async fn get_activity(&self, id: i64) -> Result<Activity, ApiError> {
        let body: ActivityResponse = self
            .fetch(&format!("{ACTIVITIES_PATH}/{id}"), self.options_get())
            .await?;
        Ok(body.into_activity())
    }

    /// Activities whose name contains `term`. A blank term lists everything.
    ///
    /// # Errors
    /// Returns [`ApiError`] like [`ConsoleClient::list_activities`].
    pub async fn search_activities(&self, term: &str) -> Result<Vec<Activity>, ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_activities().await;
        }

        let base = self.session.config().resolve_url(ACTIVITY_SEARCH_PATH);
        let url = Url::parse_with_params(&base, &[("name", term)])
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let list: ActivityListResponse = self.fetch(url.as_str(), self.options_get()).await?;
        Ok(list.into_vec())
    }

    /// Create an activity. Administrators only.
    ///
    /// # Errors
    /// Returns [`ApiError::Forbidden`] for non-administrators without calling
    /// the backend.
    pub async fn create_activity(&self, activity: &ActivityRequest) -> Result<Activity, ApiError> {
        self.ensure_admin("create activities")?;
        let options = self.apply(RequestOptions::post().json(activity)?);
        let body: ActivityResponse = self.fetch(ACTIVITIES_PATH, options).await?;
        Ok(body.into_activity())
    }

    /// Replace an activity's fields. Administrators only.
    ///
    /// # Errors
    /// Returns [`ApiError::Forbidden`] for non-administrators without calling
    /// the backend.
    pub async fn update_activity(&self, id: i64, activity: &ActivityRequest) -> Result<(), ApiError> {
        self.ensure_admin("update activities")?;
        let options = self.apply(RequestOptions::put().json(activity)?);
        self.send(&format!("{ACTIVITIES_PATH}/{id}"), options)
            .await
            .map(drop)
    }

    /// Delete an activity. Administrators only.
    ///
    /// # Errors
    /// Returns [`ApiError::Forbidden`] for non-administrators without calling
    /// the backend.
    pub async fn delete_activity(&self, id: i64) -> Result<(), ApiError> {
        self.ensure_admin("delete activities")?;
        self.send(
            &format!("{ACTIVITIES_PATH}/{id}"),
            self.apply(RequestOptions::delete()),
        )
        .await
        .map(drop)
    }

    /// Enroll the logged-in user in an activity.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] when no user id resolves, and
    /// [`ApiError::Status`] when the backend refuses (`409` when already
    /// enrolled or the activity is full).
    pub async fn enroll(&self, activity_id: i64) -> Result<(), ApiError> {
        let request = EnrollmentRequest {
            user_id: self.require_user_id()?,
            activity_id,
        };
        let options = self.apply(RequestOptions::post().json(&request)?);
        self.send(ENROLLMENTS_PATH, options).await.map(drop)
    }

    /// Enrollments of the logged-in user.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] when no user id resolves.
    pub async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        let user_id = self.require_user_id()?;
        self.fetch(
            &format!("{ENROLLMENTS_PATH}/user/{user_id}"),
            self.options_get(),
        )
        .await
    }

    /// Cancel an enrollment.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn cancel_enrollment(&self, enrollment_id: i64) -> Result<(), ApiError> {
        self.send(
            &format!("{ENROLLMENTS_PATH}/{enrollment_id}"),
            self.apply(RequestOptions::delete()),
        )
        .await
        .map(drop)
    }

    /// All user accounts. Administrators only.
    ///
    /// # Errors
    /// Returns [`ApiError::Forbidden`] for non-administrators without calling
    /// the backend.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.ensure_admin("list users")?;
        let list: UserListResponse = self.fetch(USERS_PATH, self.options_get()).await?;
        Ok(list.into_vec())
    }

    /// Delete a user account. Administrators only.
    ///
    /// # Errors
    /// Returns [`ApiError::Forbidden`] for non-administrators without calling
    /// the backend.
    pub async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.ensure_admin("delete users")?;
        self.send(
            &format!("{USERS_PATH}/{id}"),
            self.apply(RequestOptions::delete()),
        )
        .await
        .map(drop)
    }

    fn ensure_admin(&self, action: &'static str) -> Result<(), ApiError> {
        if self.session.is_admin_user() {
            Ok(())
        } else {
            debug!(action, "refusing admin-only call for a non-admin session");
            Err(ApiError::Forbidden(action))
        }
    }

    fn require_user_id(&self) -> Result<UserId, ApiError> {
        self.session
            .current_user_id()
            .ok_or(ApiError::NotAuthenticated)
    }

    fn options_get(&self) -> RequestOptions {
        self.apply(RequestOptions::get())
    }

    fn apply(&self, options: RequestOptions) -> RequestOptions {
        match &self.cancel {
            Some(token) => options.cancel_on(token.clone()),
            None => options,
        }
    }

    async fn send(&self, url: &str, options: RequestOptions) -> Result<Response, ApiError> {
        let method = options.method().clone();
        let response = self.session.authenticated_request(url, options).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorResponse>().await.unwrap_or_default();
        let message = body.reason().map_or_else(
            || status.canonical_reason().unwrap_or("request failed").to_string(),
            str::to_string,
        );
        warn!(%method, url, %status, %message, "backend returned an error");
        Err(ApiError::Status { status, message })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(url, options)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)
    }
}
