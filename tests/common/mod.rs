use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use secure_sight::api::rest::RestApi;
use secure_sight::config::{ApiConfig, CorsConfig};

/// Build the application router with the CORS middleware, as `main.rs`
/// does, against the given test pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let api = RestApi::new(&ApiConfig::default(), &CorsConfig::default(), Arc::new(pool))
        .expect("failed to construct API");
    api.app().expect("failed to build router")
}

#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn patch(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PATCH)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

#[allow(dead_code)]
pub async fn seed_camera(pool: &PgPool, name: &str, location: &str) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO cameras (name, location)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(location)
    .fetch_one(pool)
    .await
    .expect("failed to seed camera")
}

#[allow(dead_code)]
pub async fn seed_incident(
    pool: &PgPool,
    camera_id: i32,
    incident_type: &str,
    ts_start: DateTime<Utc>,
    resolved: bool,
) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO incidents (camera_id, type, ts_start, ts_end, thumbnail_url, resolved)
        VALUES ($1, $2, $3, $3 + interval '2 minutes', $4, $5)
        RETURNING id
        "#,
    )
    .bind(camera_id)
    .bind(incident_type)
    .bind(ts_start)
    .bind(format!("https://picsum.photos/200/150?random={}", camera_id))
    .bind(resolved)
    .fetch_one(pool)
    .await
    .expect("failed to seed incident")
}

#[allow(dead_code)]
pub async fn incident_resolved(pool: &PgPool, id: i32) -> bool {
    sqlx::query_scalar("SELECT resolved FROM incidents WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("failed to read incident")
}
