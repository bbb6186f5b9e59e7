//! Provider trait definition

use async_trait::async_trait;

use super::error::ProviderResult;
use crate::types::{ToolDescriptor, ToolInvocation, Transcript};

/// What the model produced for one request: final text, or a request to
/// invoke a named tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Final text for this exchange
    Text(String),
    /// The model wants a tool executed before it answers
    ToolCall(ToolInvocation),
}

impl ModelReply {
    /// The text content if this is a text reply
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelReply::Text(text) => Some(text),
            ModelReply::ToolCall(_) => None,
        }
    }

    /// Whether the model requested a tool invocation
    pub fn is_tool_call(&self) -> bool {
        matches!(self, ModelReply::ToolCall(_))
    }
}

/// Provider trait for conversational LLM implementations
///
/// Each provider receives the full transcript plus the full tool
/// declarations on every request, and interprets only the first candidate
/// of the response. Providers never mutate the transcript.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "gemini", "mock")
    fn name(&self) -> &str;

    /// Send one request and return the model's reply
    async fn send(
        &self,
        transcript: &Transcript,
        tools: &[ToolDescriptor],
    ) -> ProviderResult<ModelReply>;
}
