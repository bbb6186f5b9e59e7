//! Tool discovery and execution
//!
//! `ToolRegistry` discovers the advertised tools from the tool-provider
//! process once, translates them into the shape the model's function-calling
//! surface expects, and executes invocations by name.
//!
//! `ToolExecutor` is the seam between the conversation loop and tool
//! execution: the loop only ever sees a declarative list plus an
//! invoke-by-name function, so new tools never touch the loop.

mod registry;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::ToolDescriptor;

pub use registry::{ToolError, ToolRegistry};

/// The seam between the conversation loop and tool execution
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Declarative list of callable tools, advertised on every model request
    fn descriptors(&self) -> &[ToolDescriptor];

    /// Execute a named tool, returning the textual payload of its result
    async fn invoke(&self, name: &str, arguments: Value) -> Result<String, ToolError>;
}
