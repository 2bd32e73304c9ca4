//! HTTP transport for MCP server
//!
//! JSON-RPC over `POST /mcp` (Streamable HTTP, request/response only) plus
//! `GET /health`. Tool calls run on the blocking pool because the findings
//! client is synchronous.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use subtle::ConstantTimeEq;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;

use super::super::server::{McpServer, MCP_PROTOCOL_VERSION, SERVER_NAME};
use super::super::types::JsonRpcRequest;

/// Request bodies above this are rejected before deserialization
const MAX_BODY_BYTES: usize = 1024 * 1024;

struct HttpState {
    server: McpServer,
    /// Bearer token clients must present (None = no auth required)
    token: Option<String>,
}

type Rejection = (StatusCode, Json<Value>);

/// Run the MCP server with HTTP transport until Ctrl+C
///
/// # Arguments
/// * `config` - Findings API configuration
/// * `bind` - Address to bind to (e.g., "127.0.0.1")
/// * `port` - Port to listen on
/// * `token` - Optional bearer token; if set, requests need `Authorization: Bearer <token>`
pub fn serve_http(config: ApiConfig, bind: &str, port: u16, token: Option<String>) -> Result<()> {
    let has_token = token.is_some();
    let server = McpServer::new(config)?;
    let state = Arc::new(HttpState { server, token });

    let app = Router::new()
        .route("/mcp", post(handle_mcp_post))
        .route("/health", get(handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(Arc::clone(&state));

    let addr = format!("{}:{}", bind, port);
    let is_localhost = matches!(bind, "127.0.0.1" | "localhost" | "::1");
    if !is_localhost && !has_token {
        tracing::warn!(bind, "Binding to a non-localhost address WITHOUT authentication");
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(
            addr = %addr,
            protocol_version = MCP_PROTOCOL_VERSION,
            auth = has_token,
            "MCP HTTP server listening"
        );
        let shutdown = async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down HTTP server");
        };
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok::<_, anyhow::Error>(())
    })?;

    // Last reference to the blocking client is dropped outside the runtime
    drop(state);
    Ok(())
}

fn rejection(status: StatusCode, code: i32, message: &str) -> Rejection {
    (
        status,
        Json(json!({
            "jsonrpc": "2.0",
            "error": {"code": code, "message": message}
        })),
    )
}

/// Check `Authorization: Bearer <token>` in constant time.
fn validate_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), Rejection> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let provided = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .unwrap_or("");

    let valid = provided.len() == expected.len()
        && bool::from(provided.as_bytes().ct_eq(expected.as_bytes()));
    if valid {
        Ok(())
    } else {
        Err(rejection(
            StatusCode::UNAUTHORIZED,
            -32600,
            "Invalid or missing bearer token",
        ))
    }
}

/// Reject browser origins other than localhost (DNS rebinding guard).
/// A missing or empty Origin is allowed; most MCP clients omit it.
fn validate_origin(headers: &HeaderMap) -> Result<(), Rejection> {
    let origin = headers
        .get("origin")
        .and_then(|o| o.to_str().ok())
        .unwrap_or("");
    if origin.is_empty() || is_localhost_origin(origin) {
        Ok(())
    } else {
        Err(rejection(StatusCode::FORBIDDEN, -32600, "Invalid origin"))
    }
}

fn is_localhost_origin(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    let authority = rest.split('/').next().unwrap_or("");
    let host = if authority.starts_with('[') {
        authority.split_inclusive(']').next().unwrap_or("")
    } else {
        authority.split(':').next().unwrap_or("")
    };
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}

async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> (StatusCode, Json<Value>) {
    if let Err(e) = validate_bearer(&headers, state.token.as_deref()) {
        return e;
    }
    if let Err(e) = validate_origin(&headers) {
        return e;
    }

    let worker = Arc::clone(&state);
    let response =
        match tokio::task::spawn_blocking(move || worker.server.handle_request(request)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "MCP request handler failed");
                return rejection(StatusCode::INTERNAL_SERVER_ERROR, -32603, "Internal error");
            }
        };

    if response.is_notification_ack() {
        return (StatusCode::ACCEPTED, Json(Value::Null));
    }

    (
        StatusCode::OK,
        Json(serde_json::to_value(&response).unwrap_or_default()),
    )
}

async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
