use anyhow::Context;
use dotenvy::dotenv;
use movies_api::app;
use movies_api::config::settings::AppConfig;
use movies_api::infrastructure::db::pool;
use movies_api::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movies_api=debug,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("DATABASE_URL must be set")?;

    let state = if config.uses_memory_store() {
        warn!("Using in-memory store, data is lost on shutdown");
        AppState::with_memory_store(config.clone())
    } else {
        let db = pool::connect_to_db(&config.database_url, config.db_max_connections)
            .await
            .context("Failed to connect to database")?;
        pool::run_migrations(&db)
            .await
            .context("Failed to run migrations")?;
        AppState::postgres(config.clone(), db)
    };

    let app = app::create_app(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
