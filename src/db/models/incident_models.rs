use super::camera_models::Camera;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incident model
///
/// The category label is stored in the `type` column and serialized as the
/// JSON field `type` to match the dashboard contract.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i32,
    pub camera_id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub incident_type: String,
    pub ts_start: DateTime<Utc>,
    /// None while the incident is still ongoing
    pub ts_end: Option<DateTime<Utc>>,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

/// Helper struct for an incident with its camera embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentWithCamera {
    #[serde(flatten)]
    pub incident: Incident,
    pub camera: Camera,
}

/// Flat row shape returned by the incident/camera join queries
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IncidentWithCameraRow {
    pub id: i32,
    pub camera_id: i32,
    #[sqlx(rename = "type")]
    pub incident_type: String,
    pub ts_start: DateTime<Utc>,
    pub ts_end: Option<DateTime<Utc>>,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub camera_name: String,
    pub camera_location: String,
    pub camera_created_at: DateTime<Utc>,
}

impl From<IncidentWithCameraRow> for IncidentWithCamera {
    fn from(row: IncidentWithCameraRow) -> Self {
        IncidentWithCamera {
            camera: Camera {
                id: row.camera_id,
                name: row.camera_name,
                location: row.camera_location,
                created_at: row.camera_created_at,
            },
            incident: Incident {
                id: row.id,
                camera_id: row.camera_id,
                incident_type: row.incident_type,
                ts_start: row.ts_start,
                ts_end: row.ts_end,
                thumbnail_url: row.thumbnail_url,
                resolved: row.resolved,
                created_at: row.created_at,
            },
        }
    }
}
