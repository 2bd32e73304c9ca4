//! Stdio transport for MCP server
//!
//! Reads newline-delimited JSON-RPC requests from stdin and writes responses
//! to stdout. Logging goes to stderr so stdout carries protocol traffic only.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::ApiConfig;

use super::super::server::McpServer;
use super::super::types::{JsonRpcRequest, JsonRpcResponse};

/// Run the MCP server with stdio transport until stdin closes
pub fn serve_stdio(config: ApiConfig) -> Result<()> {
    let server = McpServer::new(config)?;
    tracing::info!("MCP stdio server ready");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_stdio(&server, stdin.lock(), stdout.lock())
}

/// Serve requests from `input` until EOF, one response line per request
pub fn run_stdio(server: &McpServer, input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(request) => server.handle_request(request),
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable JSON-RPC line");
                JsonRpcResponse::error(None, -32700, format!("Parse error: {}", e))
            }
        };

        if response.is_notification_ack() {
            continue;
        }

        let response_json = serde_json::to_string(&response)?;
        writeln!(output, "{}", response_json)?;
        output.flush()?;
    }

    tracing::info!("stdin closed, MCP stdio server exiting");
    Ok(())
}
