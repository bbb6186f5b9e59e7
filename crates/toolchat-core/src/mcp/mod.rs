//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to connect to the tool-provider process.
//! Supports Unix socket and HTTP transports.

mod client;

pub use client::{McpClient, McpError, McpResult};

// Re-export rmcp types that consumers might need
pub use rmcp::model::{CallToolResult as McpToolResult, Tool as McpTool};
