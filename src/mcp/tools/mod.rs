//! MCP tool handlers
//!
//! Each tool maps its arguments onto one findings query and returns the
//! rendered text as MCP content.

mod finding;
mod search;

use anyhow::{bail, Result};
use serde_json::Value;

use super::server::McpServer;
use super::types::{Tool, ToolsListResult};

/// Handle tools/list request - return available tools
pub fn handle_tools_list() -> Result<Value> {
    let tools = vec![
        Tool {
            name: "search_findings".into(),
            description: "Search audit findings (smart contract security reports) by keywords, severity, firm, tags, protocol, language, finder, recency and quality/rarity scores. Returns a paginated summary with one block per finding.".into(),
            input_schema: search_findings_schema(),
        },
        Tool {
            name: "get_finding_by_id".into(),
            description: "Fetch the full report for a single finding by its slug or id.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "keywords": {
                        "type": "string",
                        "description": "Slug or id of the finding (e.g. 'h-01-reentrancy-in-withdraw')"
                    }
                },
                "required": ["keywords"]
            }),
        },
    ];

    Ok(serde_json::to_value(ToolsListResult { tools })?)
}

fn search_findings_schema() -> Value {
    let text_list = |description: &str| {
        serde_json::json!({
            "type": "array",
            "items": { "type": "string" },
            "description": description
        })
    };

    serde_json::json!({
        "type": "object",
        "properties": {
            "keywords": {
                "type": "string",
                "description": "Free-text search over title and content"
            },
            "impact": {
                "type": "array",
                "items": { "type": "string", "enum": ["HIGH", "MEDIUM", "LOW", "GAS"] },
                "description": "Severity levels to include"
            },
            "firms": text_list("Audit firms (e.g. 'Cyfrin', 'Sherlock')"),
            "tags": text_list("Finding tags (e.g. 'Reentrancy', 'Oracle')"),
            "protocol": {
                "type": "string",
                "description": "Protocol name (partial match)"
            },
            "protocolCategory": text_list("Protocol categories (e.g. 'DeFi', 'Lending')"),
            "languages": text_list("Languages (e.g. 'Solidity', 'Rust')"),
            "user": {
                "type": "string",
                "description": "Finder handle (partial match)"
            },
            "minFinders": {
                "type": "string",
                "description": "Minimum number of finders, as a non-negative integer string"
            },
            "maxFinders": {
                "type": "string",
                "description": "Maximum number of finders, as a non-negative integer string"
            },
            "reportedDays": {
                "type": "string",
                "enum": ["30", "60", "90", "alltime"],
                "description": "Only findings reported within this many days"
            },
            "qualityScore": {
                "type": "number",
                "minimum": 0,
                "maximum": 5,
                "description": "Minimum quality score 0-5"
            },
            "rarityScore": {
                "type": "number",
                "minimum": 0,
                "maximum": 5,
                "description": "Minimum rarity score 0-5"
            },
            "sortField": {
                "type": "string",
                "enum": ["Recency", "Quality", "Rarity"],
                "description": "Sort field"
            },
            "sortDirection": {
                "type": "string",
                "enum": ["Desc", "Asc"],
                "description": "Sort direction"
            },
            "page": {
                "type": "integer",
                "minimum": 1,
                "description": "Page number (default: 1)",
                "default": 1
            },
            "pageSize": {
                "type": "integer",
                "minimum": 1,
                "maximum": 100,
                "description": "Results per page (default: 20, max: 100)",
                "default": 20
            }
        }
    })
}

/// Handle tools/call request - dispatch to appropriate tool handler
pub fn handle_tools_call(server: &McpServer, params: Option<Value>) -> Result<Value> {
    let params = params.ok_or_else(|| anyhow::anyhow!("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing tool name"))?;

    let arguments = params
        .get("arguments")
        .cloned()
        .filter(|a| !a.is_null())
        .unwrap_or(Value::Object(Default::default()));

    let start = std::time::Instant::now();
    tracing::debug!(tool = name, "MCP tool call started");

    let result = match name {
        "search_findings" => search::tool_search_findings(server, arguments),
        "get_finding_by_id" => finding::tool_get_finding_by_id(server, arguments),
        _ => bail!(
            "Unknown tool: '{}'. Available tools: search_findings, get_finding_by_id",
            name
        ),
    };

    let elapsed = start.elapsed();
    tracing::info!(
        tool = name,
        ok = result.is_ok(),
        elapsed_ms = elapsed.as_millis() as u64,
        "MCP tool call completed"
    );
    result
}

/// Wrap rendered text in the MCP tools/call content array
pub(crate) fn text_content(text: String) -> Value {
    serde_json::json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}
