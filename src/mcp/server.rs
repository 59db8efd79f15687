// Tool protocol dispatcher
// Author: kelexine (https://github.com/kelexine)

use super::protocol::{
    CallToolParams, JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST,
    JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::error::{GatewayError, Result};
use crate::models::{require, ProviderResponse};
use crate::tools::{descriptors, Tools, GEOCODE_TOOL, GET_WEATHER_TOOL};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "mapgate";

/// Answers tool-protocol messages by delegating to the shared [`Tools`].
#[derive(Clone)]
pub struct McpServer {
    tools: Arc<Tools>,
}

impl McpServer {
    pub fn new(tools: Arc<Tools>) -> Self {
        Self { tools }
    }

    /// Handle one raw JSON message. Returns `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!("Unparsable tool protocol message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        crate::metrics::record_mcp_message(metric_label(&request.method));

        if request.jsonrpc != JSONRPC_VERSION {
            return request.id.map(|id| {
                JsonRpcResponse::failure(id, INVALID_REQUEST, "jsonrpc must be \"2.0\"")
            });
        }

        if request.is_notification() {
            debug!("Received notification: {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let result = match request.method.as_str() {
            "initialize" => Ok(initialize_result(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": descriptors() })),
            "tools/call" => self.call_tool(request.params).await,
            other => {
                return Some(JsonRpcResponse::failure(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                ))
            }
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::failure(id, INVALID_PARAMS, e.to_string()),
        })
    }

    async fn call_tool(&self, params: Value) -> Result<Value> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| GatewayError::Validation(format!("Invalid tools/call params: {}", e)))?;

        info!("Tool call: {} {}", params.name, params.arguments);

        let output = match params.name.as_str() {
            GEOCODE_TOOL => {
                let address = require(string_arg(&params.arguments, "address"), "Address")?;
                let city = string_arg(&params.arguments, "city");
                self.tools.geocode(address, city).await
            }
            GET_WEATHER_TOOL => {
                let city = require(string_arg(&params.arguments, "city"), "City")?;
                self.tools.get_weather(city).await
            }
            other => {
                return Err(GatewayError::Validation(format!("Unknown tool: {}", other)));
            }
        };

        Ok(tool_result(output))
    }
}

fn string_arg<'a>(arguments: &'a Value, name: &str) -> &'a str {
    arguments.get(name).and_then(Value::as_str).unwrap_or("")
}

/// Wrap the provider payload as both text and structured content.
fn tool_result(output: ProviderResponse) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": output.to_string(),
        }],
        "structuredContent": output,
        "isError": false,
    })
}

fn initialize_result(params: &Value) -> Value {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

/// Keep metric label cardinality bounded regardless of client input.
fn metric_label(method: &str) -> &'static str {
    match method {
        "initialize" => "initialize",
        "ping" => "ping",
        "tools/list" => "tools/list",
        "tools/call" => "tools/call",
        m if m.starts_with("notifications/") => "notification",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_echoes_client_version() {
        let result = initialize_result(&json!({"protocolVersion": "2025-03-26"}));
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_initialize_defaults_version() {
        let result = initialize_result(&Value::Null);
        assert_eq!(result["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[test]
    fn test_tool_result_carries_text_and_structure() {
        let result = tool_result(json!({"status": "1", "info": "OK"}));
        assert_eq!(result["structuredContent"]["status"], "1");
        let text = result["content"][0]["text"].as_str().unwrap();
        let reparsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(reparsed["info"], "OK");
    }

    #[test]
    fn test_metric_label_is_bounded() {
        assert_eq!(metric_label("tools/call"), "tools/call");
        assert_eq!(metric_label("notifications/initialized"), "notification");
        assert_eq!(metric_label("random/junk"), "other");
    }
}
