//! HTTP-level tests for the `/api/users` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn empty_user_list(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/users").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn create_user_returns_created_record(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/users",
        json!({"name": "Jane Smith", "email": "jane@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Jane Smith");
    assert_eq!(json["email"], "jane@example.com");
    assert!(json["createdAt"].is_string());

    // The created user shows up in a subsequent listing.
    let response = get(build_test_app(pool), "/api/users").await;
    let listing = body_json(response).await;
    let users = listing.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "jane@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn users_are_listed_newest_first(pool: PgPool) {
    sqlx::query(
        r#"
        INSERT INTO users (name, email, created_at)
        VALUES
            ('Old Timer', 'old@example.com', now() - interval '2 days'),
            ('Newcomer', 'new@example.com', now() - interval '1 hour'),
            ('Middle Child', 'mid@example.com', now() - interval '1 day')
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = get(build_test_app(pool), "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Newcomer", "Middle Child", "Old Timer"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_surfaces_store_failure(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/users",
        json!({"name": "Jane Smith", "email": "jane@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Unique constraint violation maps to the generic 500 contract.
    let response = post_json(
        build_test_app(pool),
        "/api/users",
        json!({"name": "Jane Impostor", "email": "jane@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to create user");
}
