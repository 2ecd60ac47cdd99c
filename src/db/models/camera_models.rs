use super::incident_models::Incident;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Camera model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Helper struct for a camera with its incidents nested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraWithIncidents {
    #[serde(flatten)]
    pub camera: Camera,
    pub incidents: Vec<Incident>,
}
