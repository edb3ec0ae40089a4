use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use reqwest::Url;

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod rootly_client;

use config::Config;
use rootly_client::RootlyApi;

pub const MCP_PATH: &str = "/sse";

#[derive(Clone)]
pub struct AppState {
    pub default_token: Option<Arc<str>>,
    pub api_base_url: Arc<Url>,
    pub rootly: Arc<dyn RootlyApi>,
}

impl AppState {
    pub fn new(
        default_token: Option<String>,
        api_base_url: Url,
        rootly: Arc<dyn RootlyApi>,
    ) -> Self {
        Self {
            default_token: default_token.map(Arc::<str>::from),
            api_base_url: Arc::new(api_base_url),
            rootly,
        }
    }

    pub fn from_config(config: &Config, rootly: Arc<dyn RootlyApi>) -> Self {
        Self::new(
            config.default_token.clone(),
            config.api_base_url.clone(),
            rootly,
        )
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            MCP_PATH,
            get(http::handlers::sse_connect)
                .post(http::handlers::mcp_endpoint)
                .head(http::handlers::method_not_allowed)
                .fallback(http::handlers::method_not_allowed),
        )
        .fallback(http::handlers::not_found)
        .layer(middleware::from_fn(http::cors::cors_middleware))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
