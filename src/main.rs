use anyhow::Result;
use log::info;
use secure_sight::api::rest::RestApi;
use secure_sight::config;
use secure_sight::db::DatabaseService;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional config file path as the only CLI argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.api.log_level.as_str()),
    )
    .init();

    info!("Starting SecureSight incident API");

    let db = DatabaseService::new(&config.database).await?;

    let api = RestApi::new(&config.api, &config.cors, Arc::clone(&db.pool))?;
    info!("CORS enabled for: {:?}", config.cors.allowed_origins());

    // Blocks until an interrupt signal; in-flight requests drain first.
    api.run().await?;

    // Orderly disconnect from the store before exit.
    db.close().await;
    info!("Shutdown complete");

    Ok(())
}
