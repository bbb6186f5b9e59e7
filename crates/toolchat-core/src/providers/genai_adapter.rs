//! Adapter between toolchat-core types and genai types
//!
//! Conversion functions between our types and genai's types, so the rest of
//! the crate never touches the provider SDK directly.

use genai::chat::{
    ChatMessage as GenaiMessage, ChatResponse, Tool as GenaiTool, ToolCall as GenaiToolCall,
};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};

use super::error::{ProviderError, ProviderResult};
use super::traits::ModelReply;
use crate::types::{ToolDescriptor, ToolInvocation, Transcript, Turn};

/// Marker prepended when replaying tool output to the model.
///
/// The wire protocol carries tool output in a user-role message; this prefix
/// is what distinguishes it from typed input.
pub const TOOL_RESULT_PREFIX: &str = "Tool result: ";

// ============================================================================
// Message Conversion: toolchat -> genai
// ============================================================================

/// Convert a turn to a genai ChatMessage
pub fn to_genai_message(turn: &Turn) -> GenaiMessage {
    match turn {
        Turn::User { text } => GenaiMessage::user(text.clone()),
        Turn::Model { text } => GenaiMessage::assistant(text.clone()),
        Turn::ToolResult { text, .. } => {
            GenaiMessage::user(format!("{}{}", TOOL_RESULT_PREFIX, text))
        }
    }
}

/// Convert the full transcript to genai messages, oldest first
pub fn to_genai_messages(transcript: &Transcript) -> Vec<GenaiMessage> {
    transcript.turns().iter().map(to_genai_message).collect()
}

// ============================================================================
// Tool Conversion: toolchat -> genai
// ============================================================================

/// Convert a ToolDescriptor to a genai Tool
pub fn to_genai_tool(tool: &ToolDescriptor) -> GenaiTool {
    GenaiTool::new(tool.name.clone())
        .with_description(tool.description.clone())
        .with_schema(tool.parameters.clone())
}

/// Convert descriptors to genai tools
pub fn to_genai_tools(tools: &[ToolDescriptor]) -> Vec<GenaiTool> {
    tools.iter().map(to_genai_tool).collect()
}

// ============================================================================
// Response Conversion: genai -> toolchat
// ============================================================================

/// Convert a genai ToolCall to a ToolInvocation
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolInvocation {
    ToolInvocation {
        name: tc.fn_name.clone(),
        arguments: tc.fn_arguments.clone(),
    }
}

/// Interpret a chat response as a reply.
///
/// Only the first tool call or the first text of the response is examined;
/// a tool call wins over text. A response with neither is an error.
pub fn reply_from_response(provider: &str, response: ChatResponse) -> ProviderResult<ModelReply> {
    if let Some(tc) = response.tool_calls().first() {
        return Ok(ModelReply::ToolCall(from_genai_tool_call(tc)));
    }

    match response.first_text() {
        Some(text) => Ok(ModelReply::Text(text.to_string())),
        None => Err(ProviderError::invalid_response(
            provider,
            "response contained neither text nor a tool call",
        )),
    }
}

// ============================================================================
// Client Creation
// ============================================================================

/// Create a genai Client that authenticates with the configured key.
///
/// With no key configured, genai falls back to its own resolution (fine for
/// keyless providers such as Ollama).
pub fn create_client(api_key: Option<String>) -> Client {
    let auth_resolver = AuthResolver::from_resolver_fn(
        move |_model_iden: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
            Ok(api_key.clone().map(AuthData::from_single))
        },
    );

    Client::builder().with_auth_resolver(auth_resolver).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_conversion_roles() {
        let user = to_genai_message(&Turn::user("hello"));
        assert!(matches!(user.role, genai::chat::ChatRole::User));

        let model = to_genai_message(&Turn::model("hi"));
        assert!(matches!(model.role, genai::chat::ChatRole::Assistant));

        // Tool output rides in a user-role message with the marker prefix
        let result = to_genai_message(&Turn::tool_result("create_post", "done"));
        assert!(matches!(result.role, genai::chat::ChatRole::User));
    }

    #[test]
    fn test_tool_conversion() {
        let tool = ToolDescriptor::new("create_post", "Create a post").with_parameters(json!({
            "type": "object",
            "properties": { "status": { "type": "string" } },
            "required": ["status"]
        }));

        let genai_tool = to_genai_tool(&tool);
        assert_eq!(genai_tool.name, "create_post");
    }

    #[test]
    fn test_transcript_conversion_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::user("one"));
        transcript.push(Turn::model("two"));
        transcript.push(Turn::tool_result("create_post", "three"));

        let messages = to_genai_messages(&transcript);
        assert_eq!(messages.len(), 3);
    }
}
