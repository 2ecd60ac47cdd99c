use crate::{
    db::models::incident_models::{Incident, IncidentWithCamera, IncidentWithCameraRow},
    error::Error,
};
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

const INCIDENT_WITH_CAMERA_SELECT: &str = r#"
    SELECT i.id, i.camera_id, i.type, i.ts_start, i.ts_end,
           i.thumbnail_url, i.resolved, i.created_at,
           c.name AS camera_name, c.location AS camera_location,
           c.created_at AS camera_created_at
    FROM incidents i
    JOIN cameras c ON c.id = i.camera_id
"#;

/// Incidents repository for handling incident operations
#[derive(Clone)]
pub struct IncidentsRepository {
    pool: Arc<PgPool>,
}

impl IncidentsRepository {
    /// Create a new incidents repository
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Get incidents with their cameras, most recent start time first.
    ///
    /// When `resolved` is given, only incidents with that exact flag value
    /// are returned.
    pub async fn get_all(&self, resolved: Option<bool>) -> Result<Vec<IncidentWithCamera>> {
        let rows = match resolved {
            Some(resolved) => {
                let sql = format!(
                    "{} WHERE i.resolved = $1 ORDER BY i.ts_start DESC",
                    INCIDENT_WITH_CAMERA_SELECT
                );
                sqlx::query_as::<_, IncidentWithCameraRow>(&sql)
                    .bind(resolved)
                    .fetch_all(&*self.pool)
                    .await
            }
            None => {
                let sql = format!("{} ORDER BY i.ts_start DESC", INCIDENT_WITH_CAMERA_SELECT);
                sqlx::query_as::<_, IncidentWithCameraRow>(&sql)
                    .fetch_all(&*self.pool)
                    .await
            }
        }
        .map_err(|e| Error::Database(format!("Failed to get incidents: {}", e)))?;

        Ok(rows.into_iter().map(IncidentWithCamera::from).collect())
    }

    /// Get incident by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Incident>> {
        let result = sqlx::query_as::<_, Incident>(
            r#"
            SELECT id, camera_id, type, ts_start, ts_end, thumbnail_url, resolved, created_at
            FROM incidents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to get incident by ID: {}", e)))?;

        Ok(result)
    }

    /// Set the resolved flag on an incident, returning it with its camera.
    ///
    /// The row is assumed to exist; callers look it up first to produce a
    /// not-found response before mutating.
    pub async fn set_resolved(&self, id: i32, resolved: bool) -> Result<IncidentWithCamera> {
        sqlx::query(
            r#"
            UPDATE incidents
            SET resolved = $1
            WHERE id = $2
            "#,
        )
        .bind(resolved)
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to update incident: {}", e)))?;

        let sql = format!("{} WHERE i.id = $1", INCIDENT_WITH_CAMERA_SELECT);
        let row = sqlx::query_as::<_, IncidentWithCameraRow>(&sql)
            .bind(id)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to get updated incident: {}", e)))?;

        Ok(IncidentWithCamera::from(row))
    }
}
