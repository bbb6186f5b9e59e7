//! ToolChat Core
//!
//! The tool-augmented conversation loop: an append-only transcript of turns,
//! a registry of callable tools discovered from an MCP tool provider, and
//! providers that drive a function-calling model.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolchat_core::{ChatSession, ConsoleLogger, GenaiProvider, McpClient, ToolRegistry};
//!
//! let logger = Arc::new(ConsoleLogger::new());
//! let client = McpClient::connect_unix("/tmp/toolchat-mcp.sock", logger.clone()).await?;
//! let registry = ToolRegistry::discover(client, logger.clone()).await?;
//! let provider = GenaiProvider::new("gemini-1.5-pro", api_key, logger.clone());
//!
//! let mut session = ChatSession::new(Arc::new(provider), Arc::new(registry), 8, logger);
//! let reply = session.submit("hello").await?;
//! ```

pub mod chat;
pub mod config;
pub mod logging;
pub mod mcp;
pub mod providers;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use chat::{ChatError, ChatSession, LoopState};
pub use config::{ChatConfig, ConfigError, ToolServerAddress};
pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};
pub use mcp::{McpClient, McpError, McpResult};
pub use providers::{
    ChatProvider, GenaiProvider, MockProvider, ModelReply, ProviderError, ProviderResult,
};
pub use tools::{ToolError, ToolExecutor, ToolRegistry};
pub use types::{ArgumentError, ToolDescriptor, ToolInvocation, Transcript, Turn};
