use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;
use rand::Rng;
use secure_sight::config;
use secure_sight::db::DatabaseService;
use secure_sight::db::models::user_models::NewUser;
use secure_sight::db::repositories::users::UsersRepository;
use std::sync::Arc;

const INCIDENT_TYPES: &[&str] = &[
    "Gun Threat",
    "Unauthorized Access",
    "Suspicious Activity",
    "Loitering",
    "Vehicle Alert",
];

/// Seed the database with demo users, cameras, and a day of incidents.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_config(None)?;
    let db = DatabaseService::new(&config.database).await?;

    let users_repo = UsersRepository::new(Arc::clone(&db.pool));
    let demo_users = [
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
        ("Security Admin", "admin@securesight.com"),
        ("Mike Johnson", "mike@example.com"),
    ];
    for (name, email) in demo_users {
        users_repo
            .create(&NewUser {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;
    }

    let demo_cameras = [
        ("Shop Floor A", "Main Production Area"),
        ("Vault Camera", "Security Vault"),
        ("Main Entrance", "Building Entrance"),
        ("Parking Lot", "Employee Parking"),
    ];
    let mut camera_ids = Vec::new();
    for (name, location) in demo_cameras {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO cameras (name, location)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(location)
        .fetch_one(&*db.pool)
        .await?;
        camera_ids.push(id);
    }

    // Incidents spread over the last 24 hours, roughly 30% already resolved
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let incident_count = 15;

    for i in 0..incident_count {
        let camera_id = camera_ids[rng.gen_range(0..camera_ids.len())];
        let incident_type = INCIDENT_TYPES[rng.gen_range(0..INCIDENT_TYPES.len())];
        let hours_ago = rng.gen_range(0..24);
        let ts_start = now - Duration::hours(hours_ago);
        let duration_secs = rng.gen_range(30..=330);
        let ts_end = ts_start + Duration::seconds(duration_secs);
        let thumbnail_url = format!("https://picsum.photos/200/150?random={}", i);
        let resolved = rng.gen_bool(0.3);

        sqlx::query(
            r#"
            INSERT INTO incidents (camera_id, type, ts_start, ts_end, thumbnail_url, resolved)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(camera_id)
        .bind(incident_type)
        .bind(ts_start)
        .bind(ts_end)
        .bind(thumbnail_url)
        .bind(resolved)
        .execute(&*db.pool)
        .await?;
    }

    info!("Database seeded successfully");
    info!("Created {} users", demo_users.len());
    info!("Created {} cameras", camera_ids.len());
    info!("Created {} incidents", incident_count);

    db.close().await;

    Ok(())
}
