//! Common test fixtures and helpers
//!
//! Usage in test files:
//! ```ignore
//! mod common;
//! use common::{finding_json, search_response_json};
//! ```
#![allow(dead_code)]

use findings_mcp::config::ApiConfig;
use findings_mcp::mcp::{JsonRpcRequest, McpServer};
use httpmock::MockServer;
use serde_json::{json, Value};

/// API key used by every mocked request
pub const TEST_KEY: &str = "test-key-123";

/// A complete finding record as the remote API returns it
pub fn finding_json(n: usize) -> Value {
    json!({
        "id": format!("{}", 1000 + n),
        "slug": format!("h-{:02}-finding-{}", n, n),
        "title": format!("Finding number {}", n),
        "content": format!("Detailed description of finding {}.", n),
        "summary": null,
        "impact": "HIGH",
        "quality_score": 4,
        "general_score": 3.5,
        "report_date": "2024-05-01",
        "firm_name": "Cyfrin",
        "protocol_name": "Aave",
        "finders_count": 2,
        "source_link": "https://example.com/report",
        "issues_issue_finders": [
            {"wardens_warden": {"handle": "alice"}},
            {"wardens_warden": {"handle": "bob"}}
        ],
        "issues_issuetagscore": [
            {"tags_tag": {"title": "Reentrancy"}}
        ]
    })
}

/// Wrap findings in a full response body
pub fn search_response_json(findings: Vec<Value>, total_results: u64) -> Value {
    let count = findings.len();
    json!({
        "findings": findings,
        "metadata": {
            "totalResults": total_results,
            "currentPage": 1,
            "pageSize": count,
            "totalPages": if count == 0 { 0 } else { total_results.div_ceil(count as u64) },
            "elapsed": 0.0421
        },
        "rateLimit": {"limit": 20, "remaining": 19, "reset": 1717000000}
    })
}

/// Config pointing at a mock server with the test key
pub fn mock_config(server: &MockServer) -> ApiConfig {
    ApiConfig::new(Some(TEST_KEY.into()), server.base_url())
}

/// MCP server backed by the mock
pub fn mcp_server(config: ApiConfig) -> McpServer {
    McpServer::new(config).expect("Failed to build MCP server")
}

/// Helper to create JSON-RPC request
pub fn make_request(method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(json!(1)),
        method: method.into(),
        params,
    }
}

/// Helper to build a tools/call request
pub fn tool_call(name: &str, arguments: Value) -> JsonRpcRequest {
    make_request(
        "tools/call",
        Some(json!({
            "name": name,
            "arguments": arguments
        })),
    )
}

/// Extract the text payload from a successful tools/call result
pub fn result_text(result: &Value) -> String {
    result["content"][0]["text"]
        .as_str()
        .expect("tool result should carry text content")
        .to_string()
}
