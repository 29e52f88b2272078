use deskpulse::bootstrap;
use deskpulse::config::Config;
use deskpulse::infrastructure::http::router::build_router;
use deskpulse::infrastructure::observability;
use deskpulse::infrastructure::persistence::Database;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    let _guard = observability::init(&config).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    let state = bootstrap::build_app_state(Arc::new(db), config.analytics.clone());
    let app = build_router(state);

    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
