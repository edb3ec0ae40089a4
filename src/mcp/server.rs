//! The central Model Context Protocol dispatcher
//!
//! Routes a decoded JSON-RPC body to the capability handshake (`initialize`), the tool catalog
//! (`tools/list`), or tool execution (`tools/call`).

use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ListToolsResult, ProtocolVersion, ServerCapabilities,
    ServerCapabilitiesTools,
};
use serde_json::Value;
use tracing::info;

use crate::domain::{catalog::build_tools_list, tools::handle_tools_call};
use crate::mcp::rpc::{json_rpc_error, json_rpc_result, RpcResponse, METHOD_NOT_FOUND};
use crate::{errors::AppError, AppState};

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";

/// Dispatches one already-parsed request body.
///
/// `Err` only carries failures with no JSON-RPC representation; the transport turns those into
/// the parse-error envelope.
pub async fn handle_json_rpc_value(
    state: &AppState,
    bearer: Option<&str>,
    payload: Value,
) -> Result<RpcResponse, AppError> {
    let Value::Object(mut request) = payload else {
        return Ok(json_rpc_error(None, METHOD_NOT_FOUND, "Method not found"));
    };

    let id = request.remove("id");
    let params = request.remove("params");
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let tool = params
        .as_ref()
        .and_then(|params| params.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let response = match method.as_str() {
        "initialize" => json_rpc_result(id, initialize_result()?),
        "tools/list" => json_rpc_result(id, tools_list_result()?),
        "tools/call" => handle_tools_call(state, bearer, id, params).await?,
        _ => json_rpc_error(id, METHOD_NOT_FOUND, "Method not found"),
    };

    info!(
        method = %method,
        tool = tool.as_deref().unwrap_or("-"),
        outcome = if response.is_error() { "failure" } else { "success" },
        "mcp action audited"
    );

    Ok(response)
}

/// The fixed handshake acknowledgment; client-declared capabilities are not inspected.
pub fn initialize_result() -> Result<Value, AppError> {
    let initialize_result = InitializeResult {
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: None,
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        protocol_version: ProtocolVersion::V2024_11_05.into(),
        instructions: None,
        meta: None,
    };

    serde_json::to_value(initialize_result)
        .map_err(|err| AppError::internal(format!("initialize result serialization: {err}")))
}

pub fn tools_list_result() -> Result<Value, AppError> {
    serde_json::to_value(ListToolsResult {
        meta: None,
        next_cursor: None,
        tools: build_tools_list(),
    })
    .map_err(|err| AppError::internal(format!("tools list result serialization: {err}")))
}
