//! JSON-RPC 2.0 message types and the tool payloads carried inside them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{SearchRequest, Settings};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "checkfor";
pub const TOOL_NAME: &str = "checkfor";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// An incoming request. Missing fields default so that a well-formed object with an
/// unknown or absent method still gets a correlated response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// A JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error() -> Self {
        Self::new(PARSE_ERROR, "Parse error")
    }

    pub fn method_not_found() -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found")
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub server_info: ServerInfo,
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub tools: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsListResult {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// `dir` accepts a single path or a list of paths
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DirArgument {
    One(String),
    Many(Vec<String>),
}

impl DirArgument {
    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            Self::One(dir) => vec![PathBuf::from(dir)],
            Self::Many(dirs) => dirs.into_iter().map(PathBuf::from).collect(),
        }
    }
}

/// Arguments of a `tools/call` for the search tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchArguments {
    #[serde(alias = "dirs")]
    pub dir: Option<DirArgument>,
    pub search: Option<String>,
    pub ext: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub case_insensitive: Option<bool>,
    pub whole_word: Option<bool>,
    pub context: Option<usize>,
    pub hide_filter_stats: Option<bool>,
}

impl SearchArguments {
    /// Builds a request, filling absent arguments from `settings`
    pub fn into_request(self, settings: &Settings) -> Result<SearchRequest, RpcError> {
        let search = self
            .search
            .filter(|search| !search.is_empty())
            .ok_or_else(|| RpcError::invalid_params("Missing or invalid 'search' parameter"))?;

        let mut request = settings.request(search);
        if let Some(dir) = self.dir {
            request.dirs = dir.into_paths();
        }
        if let Some(ext) = self.ext {
            request.ext = Some(ext);
        }
        if let Some(exclude) = self.exclude {
            request.exclude = exclude;
        }
        if let Some(case_insensitive) = self.case_insensitive {
            request.case_insensitive = case_insensitive;
        }
        if let Some(whole_word) = self.whole_word {
            request.whole_word = whole_word;
        }
        if let Some(context) = self.context {
            request.context = context;
        }
        if let Some(hide_filter_stats) = self.hide_filter_stats {
            request.hide_filter_stats = hide_filter_stats;
        }
        Ok(request)
    }
}
