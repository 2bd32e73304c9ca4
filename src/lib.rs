//! # findings-mcp - audit findings search over MCP
//!
//! Exposes a remote security-findings search API (Solodit) as MCP tools.
//! Tool arguments become one REST request; the REST response comes back as
//! readable text.
//!
//! ## Pieces
//!
//! - [`filter`]: flat, optional search parameters to the API's nested request
//! - [`api`]: wire types and the blocking HTTP client
//! - [`format`]: list and detail rendering of findings
//! - [`mcp`]: JSON-RPC dispatch plus stdio and HTTP transports
//!
//! ## Quick Start
//!
//! ```no_run
//! use findings_mcp::config::{ApiConfig, Config};
//! use findings_mcp::filter::SearchParameters;
//! use findings_mcp::{format, FindingsClient};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ApiConfig::from_env(&Config::default());
//! let client = FindingsClient::new(config)?;
//!
//! let params = SearchParameters {
//!     keywords: Some("oracle manipulation".into()),
//!     page_size: Some(5),
//!     ..Default::default()
//! };
//! let response = client.search(&params.to_request())?;
//! println!("{}", format::format_search_response(&response));
//! # Ok(())
//! # }
//! ```
//!
//! ## MCP Server
//!
//! ```no_run
//! # fn example() -> anyhow::Result<()> {
//! use findings_mcp::config::{ApiConfig, Config};
//!
//! let config = ApiConfig::from_env(&Config::default());
//! // Stdio transport (blocks until stdin closes)
//! findings_mcp::serve_stdio(config.clone())?;
//!
//! // HTTP transport (None = no bearer token)
//! findings_mcp::serve_http(config, "127.0.0.1", 3000, None)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod filter;
pub mod format;
pub mod mcp;

pub use api::{ApiError, FindingsClient};
pub use filter::SearchParameters;
pub use mcp::{serve_http, serve_stdio, McpServer};
