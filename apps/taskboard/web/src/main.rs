use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::sqlite::connect_from_config_with_retry(&config.database, None)
        .await
        .map_err(|e| eyre::eyre!("SQLite connection failed: {}", e))?;

    database::sqlite::run_migrations::<Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let state = AppState { config, db };

    // Routes, /health (name/version) and /ready (database ping) share the
    // middleware stack added by create_router
    let routes = api::routes(&state)?
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));
    let app = create_router(routes);

    info!(
        database = %state.config.database.path.display(),
        "Starting taskboard with graceful shutdown (30s timeout)"
    );

    let AppState { config, db } = state;

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connection");
            match db.close().await {
                Ok(_) => info!("SQLite connection closed successfully"),
                Err(e) => tracing::error!("Error closing SQLite: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Taskboard shutdown complete");
    Ok(())
}
