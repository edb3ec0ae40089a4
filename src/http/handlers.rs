//! Axum HTTP handlers for the `/sse` endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};
use serde_json::Value;
use tracing::error;

use crate::mcp::rpc::parse_error;
use crate::mcp::server::handle_json_rpc_value;
use crate::AppState;

pub const CONNECTED_EVENT: &str = "data: {\"type\":\"connection\",\"status\":\"connected\"}\n\n";

/// One-shot connection announcement; the exchange ends with this single event.
pub async fn sse_connect() -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        CONNECTED_EVENT,
    )
        .into_response()
}

pub async fn mcp_endpoint(
    State(state): State<AppState>,
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    body: Bytes,
) -> Response {
    // A bare `null` carries no readable request, same as malformed JSON.
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => return parse_error_response(),
        Ok(value) => value,
    };

    let bearer = auth_header
        .ok()
        .map(|TypedHeader(auth)| auth.token().to_string());

    match handle_json_rpc_value(&state, bearer.as_deref(), payload).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            error!(error = %err, "request failed at the rpc boundary");
            parse_error_response()
        }
    }
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
}

fn parse_error_response() -> Response {
    (StatusCode::BAD_REQUEST, Json(parse_error())).into_response()
}
