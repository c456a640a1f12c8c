//! Enrollment rows and the enroll request body.

use serde::{Deserialize, Serialize};

use super::{Activity, UserId};

/// An enrollment of a user into an activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enrollment {
    /// Enrollment id.
    #[serde(rename = "id_inscripcion")]
    pub id: i64,

    /// Enrolled user.
    #[serde(rename = "id_usuario")]
    pub user_id: UserId,

    /// Target activity.
    #[serde(rename = "id_actividad")]
    pub activity_id: i64,

    /// Enrollment timestamp, backend formatted.
    #[serde(rename = "fecha_inscripcion", default)]
    pub enrolled_at: String,

    /// `activa`, `cancelada` or `completada`.
    #[serde(rename = "estado", default)]
    pub status: String,

    /// The activity, when preloaded.
    #[serde(rename = "actividad", default)]
    pub activity: Option<Activity>,
}

/// Body posted to `/enrollments`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollmentRequest {
    /// User being enrolled.
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,

    /// Activity to enroll in.
    #[serde(rename = "actividad_id")]
    pub activity_id: i64,
}
