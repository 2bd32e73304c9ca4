//! MCP transport implementations
//!
//! Transports provide different ways to communicate with the MCP server.

mod http;
mod stdio;

pub use http::serve_http;
pub use stdio::{run_stdio, serve_stdio};
