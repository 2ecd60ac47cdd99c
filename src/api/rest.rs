use crate::config::{ApiConfig, CorsConfig};
use crate::db::models::camera_models::CameraWithIncidents;
use crate::db::models::incident_models::IncidentWithCamera;
use crate::db::models::user_models::{NewUser, User};
use crate::db::repositories::cameras::CamerasRepository;
use crate::db::repositories::incidents::IncidentsRepository;
use crate::db::repositories::users::UsersRepository;
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use log::{error, info};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error body returned to clients as `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
            status: StatusCode::BAD_REQUEST.as_u16(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
            status: StatusCode::NOT_FOUND.as_u16(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

/// Implement IntoResponse for ApiError
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(self);
        (status, body).into_response()
    }
}

pub struct RestApi {
    config: ApiConfig,
    cors: CorsConfig,
    db_pool: Arc<PgPool>,
}

impl RestApi {
    pub fn new(config: &ApiConfig, cors: &CorsConfig, db_pool: Arc<PgPool>) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            cors: cors.clone(),
            db_pool,
        })
    }

    /// Build the application router with routes and CORS middleware.
    ///
    /// Exposed separately from [`run`](Self::run) so tests can drive the
    /// router directly without binding a socket.
    pub fn app(&self) -> Result<Router> {
        let state = AppState {
            db_pool: Arc::clone(&self.db_pool),
        };

        // Fixed origin allow-list; only these may call with credentials.
        let origins = self
            .cors
            .allowed_origins()
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600));

        let app = Router::new()
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_users).post(create_user))
            .route("/api/cameras", get(get_cameras))
            .route("/api/incidents", get(get_incidents))
            .route("/api/incidents/:id/resolve", patch(resolve_incident))
            .fallback(route_not_found)
            .with_state(state)
            .layer(cors);

        Ok(app)
    }

    /// Serve the API until an interrupt signal arrives.
    ///
    /// In-flight requests are allowed to complete before this returns; the
    /// caller is responsible for closing the database pool afterwards.
    pub async fn run(&self) -> Result<()> {
        let app = self.app()?;

        // Build the server address
        let addr = self.config.address.clone() + ":" + &self.config.port.to_string();
        let addr: SocketAddr = addr.parse()?;

        info!("API server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;

        axum::Server::from_tcp(listener.into_std()?)?
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down gracefully...");
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn health_check() -> Json<HealthResponse> {
    info!("Health check requested");
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn get_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    info!("Getting users");

    let repo = UsersRepository::new(Arc::clone(&state.db_pool));
    let users = repo.get_all().await.map_err(|e| {
        error!("Error fetching users: {}", e);
        ApiError::internal("Failed to fetch users")
    })?;

    Ok(Json(users))
}

async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> ApiResult<Json<User>> {
    let repo = UsersRepository::new(Arc::clone(&state.db_pool));
    let user = repo.create(&new_user).await.map_err(|e| {
        error!("Error creating user: {}", e);
        ApiError::internal("Failed to create user")
    })?;

    Ok(Json(user))
}

async fn get_cameras(State(state): State<AppState>) -> ApiResult<Json<Vec<CameraWithIncidents>>> {
    let repo = CamerasRepository::new(Arc::clone(&state.db_pool));
    let cameras = repo.get_all_with_incidents().await.map_err(|e| {
        error!("Error fetching cameras: {}", e);
        ApiError::internal("Failed to fetch cameras")
    })?;

    Ok(Json(cameras))
}

#[derive(Debug, Deserialize)]
struct IncidentListQuery {
    resolved: Option<String>,
}

async fn get_incidents(
    State(state): State<AppState>,
    Query(query): Query<IncidentListQuery>,
) -> ApiResult<Json<Vec<IncidentWithCamera>>> {
    info!("Getting incidents with query: {:?}", query);

    // Any value other than "true" filters for unresolved incidents,
    // matching the dashboard's `resolved=false` usage.
    let resolved = query.resolved.as_deref().map(|value| value == "true");

    let repo = IncidentsRepository::new(Arc::clone(&state.db_pool));
    let incidents = repo.get_all(resolved).await.map_err(|e| {
        error!("Error fetching incidents: {}", e);
        ApiError::internal("Failed to fetch incidents")
    })?;

    info!("Found {} incidents", incidents.len());

    Ok(Json(incidents))
}

async fn resolve_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<IncidentWithCamera>> {
    let incident_id = id
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request("Invalid incident ID"))?;

    let repo = IncidentsRepository::new(Arc::clone(&state.db_pool));

    let incident = repo
        .get_by_id(incident_id)
        .await
        .map_err(|e| {
            error!("Error updating incident: {}", e);
            ApiError::internal("Failed to update incident")
        })?
        .ok_or_else(|| ApiError::not_found("Incident not found"))?;

    // Toggle rather than set: resolving twice restores the original value.
    let updated = repo
        .set_resolved(incident_id, !incident.resolved)
        .await
        .map_err(|e| {
            error!("Error updating incident: {}", e);
            ApiError::internal("Failed to update incident")
        })?;

    Ok(Json(updated))
}

async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    info!("404 - Route not found: {} {}", method, uri.path());
    ApiError::not_found(format!("Route {} {} not found", method, uri.path()))
}
