use std::sync::Arc;

use rootly_simple_mcp::{
    build_app, config::Config, logging, rootly_client::HttpRootlyClient, AppState, MCP_PATH,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;
    let state = AppState::from_config(&config, Arc::new(HttpRootlyClient::new()));
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        endpoint = MCP_PATH,
        upstream = %config.api_base_url,
        fallback_token = config.default_token.is_some(),
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
