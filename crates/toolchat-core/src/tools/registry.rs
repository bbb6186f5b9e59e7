//! Tool registry bridging the tool-provider protocol and the model's
//! function-calling surface.
//!
//! The registry fetches the tool list exactly once, at startup, and keeps it
//! for the process lifetime; the conversation loop only ever sees the cached
//! declarative list plus invoke-by-name.

use std::sync::Arc;

use rmcp::model::RawContent;
use serde_json::Value;
use thiserror::Error;

use super::ToolExecutor;
use crate::logging::Logger;
use crate::mcp::{McpClient, McpError, McpTool, McpToolResult};
use crate::types::{ArgumentError, ToolDescriptor};

/// Errors surfaced by tool discovery and invocation
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool provider is unreachable or broke protocol; not recoverable
    /// within a session
    #[error("tool provider unavailable: {0}")]
    Provider(McpError),

    /// The provider reported that the invocation failed
    #[error("tool `{tool}` failed: {message}")]
    Execution { tool: String, message: String },

    /// Arguments rejected before invocation
    #[error("invalid arguments for `{tool}`: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: ArgumentError,
    },

    /// The result carried no text content to hand back to the model
    #[error("tool `{tool}` returned no text content")]
    EmptyResult { tool: String },
}

impl ToolError {
    /// Whether this failure should end the session rather than be reported
    /// back to the model as a result turn
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolError::Provider(_))
    }
}

/// Registry of the tools advertised by the provider
pub struct ToolRegistry {
    /// Client connection the tools execute over
    client: McpClient,
    /// Descriptor list fetched at discovery, immutable afterwards
    tools: Vec<ToolDescriptor>,
    /// Logger
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Fetch the tool list once and cache it for the process lifetime.
    ///
    /// This is the only point that ever talks to list-tools; a later
    /// tool-not-found does not trigger a re-fetch.
    pub async fn discover(client: McpClient, logger: Arc<dyn Logger>) -> Result<Self, ToolError> {
        let listed = client.list_tools().await.map_err(ToolError::Provider)?;
        let tools: Vec<ToolDescriptor> = listed.into_iter().map(descriptor_from_mcp).collect();

        logger.info(&format!(
            "[ToolRegistry] Discovered {} tools from provider",
            tools.len()
        ));

        Ok(Self {
            client,
            tools,
            logger,
        })
    }

    /// The descriptor for a tool, if it was advertised
    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Number of advertised tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the provider advertised no tools
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait::async_trait]
impl ToolExecutor for ToolRegistry {
    fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    async fn invoke(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        // Known tools get their arguments checked before anything is sent.
        // An unknown name is forwarded as-is; whether such a tool exists is
        // the provider's call.
        if let Some(descriptor) = self.descriptor(name) {
            descriptor
                .validate_arguments(&arguments)
                .map_err(|source| ToolError::InvalidArguments {
                    tool: name.to_string(),
                    source,
                })?;
        }

        self.logger
            .info(&format!("[ToolRegistry] Invoking tool: {}", name));

        let result = self
            .client
            .call_tool(name, arguments)
            .await
            .map_err(|e| match e {
                McpError::ToolCallFailed(message) => ToolError::Execution {
                    tool: name.to_string(),
                    message,
                },
                other => ToolError::Provider(other),
            })?;

        if result.is_error.unwrap_or(false) {
            return Err(ToolError::Execution {
                tool: name.to_string(),
                message: first_text(&result).unwrap_or_default().to_string(),
            });
        }

        match first_text(&result) {
            Some(text) => Ok(text.to_string()),
            None => Err(ToolError::EmptyResult {
                tool: name.to_string(),
            }),
        }
    }
}

/// Translate an advertised MCP tool into our descriptor shape.
///
/// Field names change (`input_schema` -> `parameters`); values do not.
fn descriptor_from_mcp(tool: McpTool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
        parameters: serde_json::to_value(tool.input_schema.as_ref()).unwrap_or_default(),
    }
}

/// First text content part of a tool result; the only part this system
/// consumes.
fn first_text(result: &McpToolResult) -> Option<&str> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_descriptor_translation_keeps_schema_verbatim() {
        let schema = json!({
            "type": "object",
            "properties": { "status": { "type": "string" } },
            "required": ["status"]
        });

        let mcp_tool = McpTool::new(
            "create_post".to_string(),
            "Create a post".to_string(),
            Arc::new(schema.as_object().cloned().unwrap()),
        );

        let descriptor = descriptor_from_mcp(mcp_tool);
        assert_eq!(descriptor.name, "create_post");
        assert_eq!(descriptor.description, "Create a post");
        assert_eq!(descriptor.parameters, schema);
    }
}
