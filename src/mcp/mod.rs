//! MCP (Model Context Protocol) server implementation
//!
//! Exposes `search_findings` and `get_finding_by_id` over JSON-RPC.
//!
//! # Security
//!
//! JSON deserialization from untrusted input is bounded by:
//! - HTTP transport: 1MB request body limit (RequestBodyLimitLayer)
//! - Stdio transport: trusted local client

mod server;
mod tools;
mod transports;
mod types;
mod validation;

// Public API
pub use server::{McpServer, MCP_PROTOCOL_VERSION, SERVER_NAME};
pub use transports::{run_stdio, serve_http, serve_stdio};
pub use validation::{validate_keywords, validate_search_params};
// Types kept pub for integration tests; not part of the stable API
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
