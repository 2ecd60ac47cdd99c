use crate::{
    db::models::camera_models::{Camera, CameraWithIncidents},
    db::models::incident_models::Incident,
    error::Error,
};
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// Cameras repository for handling camera operations
#[derive(Clone)]
pub struct CamerasRepository {
    pool: Arc<PgPool>,
}

impl CamerasRepository {
    /// Create a new cameras repository
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Get all cameras, each with its incidents nested newest-created first
    pub async fn get_all_with_incidents(&self) -> Result<Vec<CameraWithIncidents>> {
        let cameras = sqlx::query_as::<_, Camera>(
            r#"
            SELECT id, name, location, created_at
            FROM cameras
            ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get all cameras: {}", e)))?;

        let incidents = sqlx::query_as::<_, Incident>(
            r#"
            SELECT id, camera_id, type, ts_start, ts_end, thumbnail_url, resolved, created_at
            FROM incidents
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get camera incidents: {}", e)))?;

        // Group incidents under their cameras, preserving the created_at
        // ordering within each group.
        let mut result: Vec<CameraWithIncidents> = cameras
            .into_iter()
            .map(|camera| CameraWithIncidents {
                camera,
                incidents: Vec::new(),
            })
            .collect();

        for incident in incidents {
            if let Some(entry) = result
                .iter_mut()
                .find(|entry| entry.camera.id == incident.camera_id)
            {
                entry.incidents.push(incident);
            }
        }

        Ok(result)
    }
}
