//! Search tool - filtered findings search

use anyhow::Result;
use serde_json::Value;

use crate::filter::SearchParameters;
use crate::format::format_search_response;

use super::super::server::McpServer;
use super::super::validation::validate_search_params;
use super::text_content;

/// Execute `search_findings`
pub fn tool_search_findings(server: &McpServer, arguments: Value) -> Result<Value> {
    let params: SearchParameters = serde_json::from_value(arguments)
        .map_err(|e| anyhow::anyhow!("Invalid search_findings arguments: {}", e))?;
    validate_search_params(&params)?;

    let request = params.to_request();
    let response = server.client.search(&request)?;

    tracing::debug!(
        findings = response.findings.len(),
        total = response.metadata.total_results,
        "search_findings rendered"
    );
    Ok(text_content(format_search_response(&response)))
}
