use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::types::{
    Capabilities, ContentItem, InitializeResult, JsonRpcRequest, JsonRpcResponse, RpcError,
    SearchArguments, ServerInfo, Tool, ToolCallParams, ToolCallResult, ToolsListResult,
    PROTOCOL_VERSION, SERVER_NAME, TOOL_NAME,
};
use crate::config::Settings;
use crate::search::scan_all;

const TOOL_DESCRIPTION: &str = "Search files in directories for a string pattern. \
Single-depth (non-recursive) scanning with optional extension filtering, \
case-insensitive search, whole-word matching, and context lines.";

/// Dispatches JSON-RPC requests to the search engine.
///
/// Supports:
/// - `initialize`: capability negotiation
/// - `tools/list`: describes the `checkfor` tool and its input schema
/// - `tools/call`: runs a search and returns the result as a JSON text item
///
/// Every request produces exactly one response carrying the request id.
#[derive(Debug, Clone, Default)]
pub struct McpServer {
    settings: Settings,
}

impl McpServer {
    /// Creates a server whose absent tool arguments fall back to `settings`
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Handles one raw input line. Empty lines produce no response.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return None;
        }

        match parse_request(line) {
            Ok(request) => Some(self.handle_request(request)),
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::failure(Value::Null, RpcError::parse_error()))
            }
        }
    }

    /// Handles a parsed request
    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling request: {}", request.method);

        let outcome = match request.method.as_str() {
            "initialize" => to_result(self.initialize()),
            "tools/list" => to_result(self.tools_list()),
            "tools/call" => self.tools_call(request.params),
            _ => Err(RpcError::method_not_found()),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(error) => {
                debug!("Request {} failed: {}", request.method, error);
                JsonRpcResponse::failure(request.id, error)
            }
        }
    }

    fn initialize(&self) -> InitializeResult {
        let mut tools = BTreeMap::new();
        tools.insert("list".to_string(), true);
        tools.insert("call".to_string(), true);

        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: Capabilities { tools },
        }
    }

    fn tools_list(&self) -> ToolsListResult {
        ToolsListResult {
            tools: vec![Tool {
                name: TOOL_NAME.to_string(),
                description: TOOL_DESCRIPTION.to_string(),
                input_schema: input_schema(),
            }],
        }
    }

    fn tools_call(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params = params.ok_or_else(|| RpcError::invalid_params("Invalid params"))?;
        let params: ToolCallParams = serde_json::from_value(params)
            .map_err(|_| RpcError::invalid_params("Invalid params"))?;

        if params.name != TOOL_NAME {
            return Err(RpcError::invalid_params("Unknown tool"));
        }

        if !params.arguments["search"].is_string() {
            return Err(RpcError::invalid_params(
                "Missing or invalid 'search' parameter",
            ));
        }

        let arguments: SearchArguments = serde_json::from_value(params.arguments)
            .map_err(|e| RpcError::invalid_params(format!("Invalid params: {}", e)))?;
        let request = arguments.into_request(&self.settings)?;

        let result = scan_all(&request)
            .map_err(|e| RpcError::internal_error(format!("Search failed: {}", e)))?;
        let text = serde_json::to_string(&result)
            .map_err(|_| RpcError::internal_error("Failed to marshal result"))?;

        to_result(ToolCallResult {
            content: vec![ContentItem::text(text)],
        })
    }
}

/// Only a JSON object is a request; serde would also accept a positional array
fn parse_request(line: &str) -> Result<JsonRpcRequest, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("request must be a JSON object"));
    }
    serde_json::from_value(value)
}

fn to_result<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(e.to_string()))
}

/// JSON schema for the tool's arguments
fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "dir": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Array of directory paths to search. Can also accept a single string. Defaults to current directory if not provided."
            },
            "search": {
                "type": "string",
                "description": "String pattern to search for"
            },
            "ext": {
                "type": "string",
                "description": "File extension to filter (e.g., '.go', '.rtf'). Optional."
            },
            "exclude": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Array of strings to exclude from results. Matches containing any of these strings will be filtered out. Optional."
            },
            "case_insensitive": {
                "type": "boolean",
                "description": "Perform case-insensitive search. Optional, defaults to false.",
                "default": false
            },
            "whole_word": {
                "type": "boolean",
                "description": "Match whole words only. Optional, defaults to false.",
                "default": false
            },
            "context": {
                "type": "integer",
                "minimum": 0,
                "description": "Number of context lines before and after each match. Optional, defaults to 0.",
                "default": 0
            },
            "hide_filter_stats": {
                "type": "boolean",
                "description": "Hide original_matches and filtered_matches from output. Optional, defaults to false.",
                "default": false
            }
        },
        "required": ["search"]
    })
}
