//! `tools/call` execution
//!
//! Resolves the caller's token, binds the named tool to its arguments, performs the single
//! upstream GET, and relays the JSON body as one pretty-printed text block.

use rust_mcp_sdk::schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent};
use serde_json::{Map, Value};

use crate::domain::catalog::RootlyTool;
use crate::domain::utils::{build_upstream_url, ToolInvocation};
use crate::errors::AppError;
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_result, RpcResponse, INVALID_PARAMS,
};
use crate::AppState;

/// Prefers the request's own bearer token over the configured fallback.
pub fn resolve_token<'a>(bearer: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    bearer
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .or(fallback)
}

pub async fn handle_tools_call(
    state: &AppState,
    bearer: Option<&str>,
    id: Option<Value>,
    params: Option<Value>,
) -> Result<RpcResponse, AppError> {
    let Some(token) = resolve_token(bearer, state.default_token.as_deref()) else {
        return app_error_to_json_rpc(id, AppError::MissingToken);
    };

    // Without a tool name there is nothing to look up, which reads as an unknown tool.
    let Some(params) = params.filter(|params| params.get("name").is_some_and(Value::is_string))
    else {
        return app_error_to_json_rpc(id, AppError::unknown_tool(""));
    };
    let Ok(tool_call) = serde_json::from_value::<CallToolRequestParams>(params) else {
        return Ok(json_rpc_error(id, INVALID_PARAMS, "Invalid params"));
    };

    match call_tool(state, token, &tool_call.name, tool_call.arguments.unwrap_or_default()).await
    {
        Ok(result) => Ok(json_rpc_result(id, result)),
        Err(err) => app_error_to_json_rpc(id, err),
    }
}

async fn call_tool(
    state: &AppState,
    token: &str,
    name: &str,
    arguments: Map<String, Value>,
) -> Result<Value, AppError> {
    let tool = RootlyTool::from_name(name).ok_or_else(|| AppError::unknown_tool(name))?;
    let invocation = ToolInvocation::resolve(tool, &arguments)?;
    let url = build_upstream_url(&state.api_base_url, &invocation)?;

    let data = state.rootly.get(url, token).await?;
    let text = serde_json::to_string_pretty(&data)
        .map_err(|err| AppError::internal(format!("failed to render rootly response: {err}")))?;

    serde_json::to_value(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error: None,
        meta: None,
        structured_content: None,
    })
    .map_err(|err| AppError::internal(format!("tool result serialization failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::resolve_token;

    #[test]
    fn header_token_wins_over_fallback() {
        assert_eq!(resolve_token(Some("header"), Some("env")), Some("header"));
    }

    #[test]
    fn blank_header_token_falls_back() {
        assert_eq!(resolve_token(Some("  "), Some("env")), Some("env"));
        assert_eq!(resolve_token(None, Some("env")), Some("env"));
    }

    #[test]
    fn no_token_anywhere() {
        assert_eq!(resolve_token(None, None), None);
    }
}
