//! Activities, their schedule slot and the create/update payload.

use serde::{Deserialize, Serialize};

/// Weekly time slot an activity runs in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    /// Slot id.
    #[serde(rename = "id_horario", default)]
    pub id: i64,

    /// Day of the week, as stored by the backend (`"Lunes"`, ...).
    #[serde(rename = "dia", default)]
    pub day: String,

    /// Start time, backend formatted.
    #[serde(rename = "hora_inicio", default)]
    pub starts_at: String,

    /// End time, backend formatted.
    #[serde(rename = "hora_fin", default)]
    pub ends_at: String,
}

/// An activity members can enroll in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    /// Activity id.
    #[serde(rename = "id_actividad")]
    pub id: i64,

    /// Activity name, unique per backend.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Instructor name.
    #[serde(rename = "profesor", default)]
    pub instructor: String,

    /// Remaining slots.
    #[serde(rename = "cupos", default)]
    pub slots: u32,

    /// Category label.
    #[serde(rename = "categoria", default)]
    pub category: String,

    /// Free-form description.
    #[serde(rename = "descripcion", default)]
    pub description: String,

    /// Time slot, absent when the backend did not preload it.
    #[serde(default)]
    pub schedule: Option<Schedule>,
}

/// Payload for creating or updating an activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityRequest {
    /// Activity name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Instructor name.
    #[serde(rename = "profesor")]
    pub instructor: String,

    /// Total slots.
    #[serde(rename = "cupos")]
    pub slots: u32,

    /// Category label.
    #[serde(rename = "categoria")]
    pub category: String,

    /// Free-form description.
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl From<&Activity> for ActivityRequest {
    /// Editable fields of an existing activity, used to pre-fill an update.
    fn from(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            instructor: activity.instructor.clone(),
            slots: activity.slots,
            category: activity.category.clone(),
            description: activity.description.clone(),
        }
    }
}

/// `/activities` answers either `{"activities": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActivityListResponse {
    /// Object-wrapped list.
    Wrapped {
        /// The activities.
        activities: Vec<Activity>,
    },
    /// Bare JSON array.
    Bare(Vec<Activity>),
}

impl ActivityListResponse {
    /// Flatten either shape into the list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Activity> {
        match self {
            Self::Wrapped { activities } | Self::Bare(activities) => activities,
        }
    }
}

/// `/activities/{id}` answers either `{"activity": {...}}` or the bare object.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ActivityResponse {
    /// Object-wrapped activity.
    Wrapped {
        /// The activity.
        activity: Activity,
    },
    /// Bare activity object.
    Bare(Activity),
}

impl ActivityResponse {
    /// Unwrap either shape.
    #[must_use]
    pub fn into_activity(self) -> Activity {
        match self {
            Self::Wrapped { activity } | Self::Bare(activity) => activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yoga() -> serde_json::Value {
        json!({
            "id_actividad": 7,
            "nombre": "Yoga",
            "profesor": "Laura",
            "cupos": 12,
            "categoria": "Bienestar",
            "descripcion": "Hatha yoga",
            "schedule": {"id_horario": 3, "dia": "Lunes", "hora_inicio": "18:00", "hora_fin": "19:00"}
        })
    }

    #[test]
    fn activity_maps_backend_field_names() {
        let activity: Activity = serde_json::from_value(yoga()).unwrap();
        assert_eq!(activity.id, 7);
        assert_eq!(activity.name, "Yoga");
        assert_eq!(activity.instructor, "Laura");
        assert_eq!(activity.slots, 12);
        assert_eq!(activity.schedule.unwrap().day, "Lunes");
    }

    #[test]
    fn list_accepts_wrapped_and_bare_shapes() {
        let wrapped: ActivityListResponse =
            serde_json::from_value(json!({"activities": [yoga()]})).unwrap();
        let bare: ActivityListResponse = serde_json::from_value(json!([yoga()])).unwrap();
        assert_eq!(wrapped.into_vec(), bare.into_vec());
    }

    #[test]
    fn single_activity_accepts_wrapped_and_bare_shapes() {
        let wrapped: ActivityResponse =
            serde_json::from_value(json!({"activity": yoga(), "success": true})).unwrap();
        let bare: ActivityResponse = serde_json::from_value(yoga()).unwrap();
        assert_eq!(wrapped.into_activity(), bare.into_activity());
    }

    #[test]
    fn request_prefilled_from_activity_keeps_editable_fields() {
        let activity: Activity = serde_json::from_value(yoga()).unwrap();
        let request = ActivityRequest::from(&activity);
        assert_eq!(request.name, "Yoga");
        assert_eq!(request.instructor, "Laura");
        assert_eq!(request.slots, 12);
        assert_eq!(request.category, "Bienestar");
        assert_eq!(request.description, "Hatha yoga");
    }

    #[test]
    fn request_uses_backend_field_names() {
        let request = ActivityRequest {
            name: "Spinning".to_string(),
            instructor: "Marcos".to_string(),
            slots: 20,
            category: "Cardio".to_string(),
            description: String::new(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["nombre"], "Spinning");
        assert_eq!(body["cupos"], 20);
    }
}
