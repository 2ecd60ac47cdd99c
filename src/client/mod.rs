use crate::db::models::camera_models::CameraWithIncidents;
use crate::db::models::incident_models::IncidentWithCamera;
use crate::db::models::user_models::{NewUser, User};
use crate::error::Error;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod dashboard;

pub use dashboard::{Dashboard, IncidentListState, UserDirectory};

/// Typed HTTP client for the SecureSight API.
///
/// Holds the base URL of one API instance. No request timeout is
/// configured; a hung server blocks the triggering call.
pub struct SecureSightClient {
    base_url: String,
    http: reqwest::Client,
}

/// Liveness marker returned by `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl SecureSightClient {
    /// Create a new client targeting `base_url`, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Base URL from `SECURESIGHT_API_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SECURESIGHT_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<Health> {
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|e| Error::Api(format!("Health request failed: {}", e)))?;
        decode(response).await
    }

    /// All users, newest first.
    pub async fn users(&self) -> Result<Vec<User>> {
        let response = self
            .http
            .get(self.url("/api/users"))
            .send()
            .await
            .map_err(|e| Error::Api(format!("Users request failed: {}", e)))?;
        decode(response).await
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<User> {
        let payload = NewUser {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/users"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Api(format!("Create user request failed: {}", e)))?;
        decode(response).await
    }

    /// All cameras with their incidents nested.
    pub async fn cameras(&self) -> Result<Vec<CameraWithIncidents>> {
        let response = self
            .http
            .get(self.url("/api/cameras"))
            .send()
            .await
            .map_err(|e| Error::Api(format!("Cameras request failed: {}", e)))?;
        decode(response).await
    }

    /// Incidents with cameras embedded, optionally filtered by resolved flag.
    pub async fn incidents(&self, resolved: Option<bool>) -> Result<Vec<IncidentWithCamera>> {
        let mut request = self.http.get(self.url("/api/incidents"));
        if let Some(resolved) = resolved {
            request = request.query(&[("resolved", if resolved { "true" } else { "false" })]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Api(format!("Incidents request failed: {}", e)))?;
        decode(response).await
    }

    /// Toggle the resolved flag on an incident.
    pub async fn resolve_incident(&self, id: i32) -> Result<IncidentWithCamera> {
        let response = self
            .http
            .patch(self.url(&format!("/api/incidents/{}/resolve", id)))
            .send()
            .await
            .map_err(|e| Error::Api(format!("Resolve request failed: {}", e)))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        let value = response
            .json::<T>()
            .await
            .map_err(|e| Error::Api(format!("Failed to decode response: {}", e)))?;
        Ok(value)
    } else {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(Error::Api(format!("{}: {}", status, message)).into())
    }
}
