//! # Models
//!
//! Request and response shapes of the enrollment backend.

pub mod activity;
pub mod auth;
pub mod enrollment;
pub mod errors;
pub mod user;

pub use activity::{Activity, ActivityListResponse, ActivityRequest, ActivityResponse, Schedule};
pub use auth::{LoginRequest, LoginResponse, LoginUser, ResponseShapeError, SessionUser, UserId};
pub use enrollment::{Enrollment, EnrollmentRequest};
pub use errors::ErrorResponse;
pub use user::{UserListResponse, UserSummary};
