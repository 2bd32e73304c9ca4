//! Single finding lookup by slug or id

use anyhow::Result;
use serde_json::Value;

use crate::filter::lookup_request;
use crate::format::format_finding_detail;

use super::super::server::McpServer;
use super::super::types::GetFindingArgs;
use super::super::validation::validate_keywords;
use super::text_content;

/// Execute `get_finding_by_id`
pub fn tool_get_finding_by_id(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: GetFindingArgs = serde_json::from_value(arguments)
        .map_err(|e| anyhow::anyhow!("Invalid get_finding_by_id arguments: {}", e))?;
    validate_keywords(&args.keywords)?;

    let response = server.client.search(&lookup_request(&args.keywords))?;
    if response.findings.is_empty() {
        tracing::info!(keywords = %args.keywords, "No finding matched lookup");
    }
    Ok(text_content(format_finding_detail(&response, &args.keywords)))
}
