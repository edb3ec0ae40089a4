use std::time::Instant;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Emits one summary line per request. Only the presence of credentials is recorded.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let has_credentials = request.headers().contains_key(header::AUTHORIZATION);
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        has_credentials,
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.is_server_error() {
        error!(method = %method, path = %path, status = status.as_u16(), "request failed");
    } else if status.is_client_error() {
        warn!(method = %method, path = %path, status = status.as_u16(), "request rejected");
    }

    response
}
