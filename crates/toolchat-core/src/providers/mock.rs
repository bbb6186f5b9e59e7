//! Mock provider for testing
//!
//! Provides deterministic, scripted replies without network dependencies,
//! and records every request it receives for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatProvider, ModelReply};
use crate::types::{ToolDescriptor, ToolInvocation, Transcript, Turn};

/// One recorded provider request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Transcript turns at the time of the request
    pub turns: Vec<Turn>,
    /// Names of the tool declarations that accompanied the request
    pub tool_names: Vec<String>,
}

/// Scripted reply step
enum Step {
    Reply(ModelReply),
    Error(String),
}

/// Mock LLM provider with a scripted reply queue
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockProvider {
    /// Create a provider with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text reply
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.push(Step::Reply(ModelReply::Text(text.into())));
        self
    }

    /// Queue a tool-call reply
    pub fn then_tool_call(self, name: impl Into<String>, arguments: Value) -> Self {
        self.push(Step::Reply(ModelReply::ToolCall(ToolInvocation::new(
            name, arguments,
        ))));
        self
    }

    /// Queue a failing request
    pub fn then_error(self, message: impl Into<String>) -> Self {
        self.push(Step::Error(message.into()));
        self
    }

    /// Every request this provider has received, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, step: Step) {
        self.script.lock().unwrap().push_back(step);
    }
}

#[async_trait::async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(
        &self,
        transcript: &Transcript,
        tools: &[ToolDescriptor],
    ) -> ProviderResult<ModelReply> {
        self.requests.lock().unwrap().push(RecordedRequest {
            turns: transcript.turns().to_vec(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Step::Reply(reply)) => Ok(reply),
            Some(Step::Error(message)) => Err(ProviderError::api_error("mock", message)),
            None => Err(ProviderError::Other("mock script exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let provider = MockProvider::new()
            .then_tool_call("create_post", json!({ "status": "gm" }))
            .then_text("done");

        let transcript = Transcript::new();

        let first = provider.send(&transcript, &[]).await.unwrap();
        assert!(first.is_tool_call());

        let second = provider.send(&transcript, &[]).await.unwrap();
        assert_eq!(second.as_text(), Some("done"));

        // Script exhausted
        assert!(provider.send(&transcript, &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let provider = MockProvider::new().then_text("hi");

        let mut transcript = Transcript::new();
        transcript.push(Turn::user("hello"));
        let tools = vec![ToolDescriptor::new("create_post", "Create a post")];

        provider.send(&transcript, &tools).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].turns.len(), 1);
        assert_eq!(requests[0].tool_names, ["create_post"]);
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let provider = MockProvider::new().then_error("quota exceeded");
        let result = provider.send(&Transcript::new(), &[]).await;
        assert!(matches!(result, Err(ProviderError::ApiError { .. })));
    }
}
