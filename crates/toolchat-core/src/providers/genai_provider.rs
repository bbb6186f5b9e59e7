//! GenaiProvider - provider backed by the genai crate
//!
//! Handles all genai-supported APIs (Gemini, OpenAI, Anthropic, Ollama, ...)
//! through one implementation; the adapter kind is inferred from the model
//! name, or forced with a `provider/model` prefix.

use std::sync::Arc;

use genai::chat::ChatRequest;
use genai::Client;

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{create_client, reply_from_response, to_genai_messages, to_genai_tools};
use super::traits::{ChatProvider, ModelReply};
use crate::logging::Logger;
use crate::types::{ToolDescriptor, Transcript};

/// Unified provider using genai for all supported LLM APIs
pub struct GenaiProvider {
    /// Provider identifier, derived from the model string
    provider_id: String,
    /// Model identifier as used by the provider's API
    model: String,
    /// genai client with our auth resolver installed
    client: Client,
    /// Logger for debug output
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    /// Create a new GenaiProvider for the given model
    pub fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let model = model.into();
        let provider_id = Self::extract_provider(&model)
            .unwrap_or("gemini")
            .to_string();

        Self {
            provider_id,
            model,
            client: create_client(api_key),
            logger,
        }
    }

    /// Extract the provider prefix from a model string
    /// (e.g., "openai/gpt-4" -> Some("openai"), "gemini-1.5-pro" -> None)
    pub fn extract_provider(model: &str) -> Option<&str> {
        match model.split_once('/') {
            Some((provider, _)) => Some(provider),
            None => None,
        }
    }

    /// Extract the bare model name (e.g., "openai/gpt-4" -> "gpt-4")
    pub fn extract_model_name(model: &str) -> &str {
        match model.split_once('/') {
            Some((_, name)) => name,
            None => model,
        }
    }
}

#[async_trait::async_trait]
impl ChatProvider for GenaiProvider {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn send(
        &self,
        transcript: &Transcript,
        tools: &[ToolDescriptor],
    ) -> ProviderResult<ModelReply> {
        let model_name = Self::extract_model_name(&self.model);

        self.logger.debug(&format!(
            "[GenaiProvider] Sending {} turns and {} tool declarations to {}",
            transcript.len(),
            tools.len(),
            model_name
        ));

        let mut chat_req = ChatRequest::new(to_genai_messages(transcript));
        if !tools.is_empty() {
            chat_req = chat_req.with_tools(to_genai_tools(tools));
        }

        let response = self
            .client
            .exec_chat(model_name, chat_req, None)
            .await
            .map_err(|e| ProviderError::api_error(&self.provider_id, e.to_string()))?;

        reply_from_response(&self.provider_id, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_extract_provider() {
        assert_eq!(GenaiProvider::extract_provider("openai/gpt-4"), Some("openai"));
        assert_eq!(
            GenaiProvider::extract_provider("anthropic/claude-3"),
            Some("anthropic")
        );
        assert_eq!(GenaiProvider::extract_provider("gemini-1.5-pro"), None);
    }

    #[test]
    fn test_extract_model_name() {
        assert_eq!(GenaiProvider::extract_model_name("openai/gpt-4"), "gpt-4");
        assert_eq!(
            GenaiProvider::extract_model_name("gemini-1.5-pro"),
            "gemini-1.5-pro"
        );
    }

    #[test]
    fn test_provider_id_defaults_to_gemini() {
        let provider = GenaiProvider::new("gemini-1.5-pro", None, Arc::new(NoOpLogger));
        assert_eq!(provider.name(), "gemini");

        let prefixed = GenaiProvider::new("openai/gpt-4", None, Arc::new(NoOpLogger));
        assert_eq!(prefixed.name(), "openai");
    }
}
