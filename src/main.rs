use anyhow::Context;
use tracing::info;

use travel_log_api::config::AppConfig;
use travel_log_api::database;
use travel_log_api::handlers::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up API_KEY, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Missing API_KEY (or DATABASE_URL for postgres) stops startup here
    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(
        "Starting Travel Log API in {:?} mode ({:?} store)",
        config.environment, config.database.backend
    );

    let store = database::open_store(&config.database)
        .await
        .context("failed to open record store")?;
    let state = AppState::new(store, config.security.api_key.clone());
    let app = travel_log_api::app(state, &config);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Travel Log API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Travel Log API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
