//! MCP Server core implementation
//!
//! The McpServer handles JSON-RPC requests and coordinates tool execution.

use anyhow::Result;
use serde_json::Value;

use crate::api::FindingsClient;
use crate::config::ApiConfig;

use super::tools;
use super::types::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities,
    ServerInfo, ToolsCapability,
};

/// MCP protocol version
pub const MCP_PROTOCOL_VERSION: &str = "2025-11-25";

/// Name reported in `serverInfo` and `/health`
pub const SERVER_NAME: &str = "findings-mcp";

/// MCP Server
///
/// Holds no mutable state; every method takes `&self` so transports can
/// share one instance across requests.
pub struct McpServer {
    pub(crate) client: FindingsClient,
}

impl McpServer {
    /// Create a server backed by a findings client built from `config`.
    ///
    /// A missing API key is not fatal here. Tool calls report it.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = FindingsClient::new(config)?;
        Ok(Self { client })
    }

    /// Handle a JSON-RPC request
    pub fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            // Notifications, no response needed
            "initialized" | "notifications/initialized" => Ok(Value::Null),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => tools::handle_tools_list(),
            "tools/call" => tools::handle_tools_call(self, request.params),
            _ => Err(anyhow::anyhow!("Unknown method: {}", request.method)),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".into(),
                id: request.id,
                result: Some(value),
                error: None,
            },
            Err(e) => {
                // Log full chain, return a redacted single line to the client
                let full_error = format!("{:#}", e);
                tracing::debug!(error = %self.sanitize_error_message(&full_error), "Request error");
                JsonRpcResponse::error(request.id, -32000, self.sanitize_error_message(&e.to_string()))
            }
        }
    }

    /// Strip the API key from anything headed back to a client or a log.
    fn sanitize_error_message(&self, error: &str) -> String {
        match self.client.config().api_key() {
            Some(key) => error.replace(key, "<redacted>"),
            None => error.to_string(),
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value> {
        let params: Option<InitializeParams> = params.map(serde_json::from_value).transpose()?;
        if let Some(p) = &params {
            tracing::info!(
                client = p.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
                client_version = p.client_info.as_ref().and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                protocol_version = %p.protocol_version,
                "MCP client initialized"
            );
        }

        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.into(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
        };

        Ok(serde_json::to_value(result)?)
    }
}
