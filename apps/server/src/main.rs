use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tower_http::trace::TraceLayer;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    // Initialize the application state with a fresh in-memory store
    let state = AppState::new(config);

    // Build router with API routes
    let app = api::routes(&state).layer(TraceLayer::new_for_http());

    info!("Starting ShareHub server");

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareHub server shutdown complete");
    Ok(())
}
