//! JSON-RPC envelope types and formatting utilities
//!
//! Every reply leaving the dispatcher is an [`RpcResponse`]. The request `id` is carried as a raw
//! JSON value so it is echoed back verbatim, including `null`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

pub const MISSING_TOKEN_MESSAGE: &str =
    "ROOTLY_API_TOKEN required. Use Authorization: Bearer <token> header.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
}

/// Exactly one of `result` or `error` is present on the wire.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RpcOutcome {
    Result(Value),
    Error(RpcError),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RpcOutcome::Error(_))
    }
}

pub fn json_rpc_result(id: Option<Value>, result: Value) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0",
        id,
        outcome: RpcOutcome::Result(result),
    }
}

pub fn json_rpc_error(id: Option<Value>, code: i32, message: &str) -> RpcResponse {
    json_rpc_error_with_data(id, code, message, None)
}

pub fn json_rpc_error_with_data(
    id: Option<Value>,
    code: i32,
    message: &str,
    data: Option<Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0",
        id,
        outcome: RpcOutcome::Error(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
    }
}

/// The reply for a body that could not be read as JSON. No `id` can be recovered.
pub fn parse_error() -> RpcResponse {
    json_rpc_error(None, PARSE_ERROR, "Parse error")
}

/// Maps a tool-invocation failure onto its JSON-RPC error object.
///
/// `Internal` has no JSON-RPC representation: it is handed back so the caller can let it reach
/// the outer failure boundary.
pub fn app_error_to_json_rpc(id: Option<Value>, err: AppError) -> Result<RpcResponse, AppError> {
    let response = match err {
        AppError::BadRequest { code, message } => json_rpc_error_with_data(
            id,
            INVALID_PARAMS,
            "Invalid params",
            Some(json!({
                "code": code,
                "message": message,
                "details": {}
            })),
        ),
        AppError::MissingToken => json_rpc_error(id, INVALID_PARAMS, MISSING_TOKEN_MESSAGE),
        AppError::UnknownTool { name } => json_rpc_error_with_data(
            id,
            METHOD_NOT_FOUND,
            "Unknown tool",
            Some(json!({
                "code": "tool_not_found",
                "message": "unknown tool name",
                "details": {
                    "name": name,
                },
            })),
        ),
        err @ AppError::Upstream { .. } => json_rpc_error(id, INTERNAL_ERROR, &err.to_string()),
        err @ AppError::Internal { .. } => return Err(err),
    };

    Ok(response)
}
