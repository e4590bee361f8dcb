use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use sharehub_gateway::api;
use sharehub_gateway::client::ForwardClient;
use sharehub_gateway::config::Config;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Forwarding to ShareHub server at {}", config.server_url);

    let forward_client = ForwardClient::new(config.server_url.clone());

    // Build router with the validating gateway routes
    let app = api::routes(forward_client).layer(TraceLayer::new_for_http());

    info!("Starting ShareHub gateway");

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareHub gateway shutdown complete");
    Ok(())
}
