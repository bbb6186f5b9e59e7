//! The conversation loop
//!
//! `ChatSession` owns the transcript and drives the request/response cycle
//! with the model: append user input, send the full transcript plus tool
//! declarations, execute a requested tool and re-send, or return the model's
//! text. One session, one transcript, strictly sequential.

use std::sync::Arc;

use thiserror::Error;

use crate::logging::Logger;
use crate::providers::{ChatProvider, ModelReply, ProviderError};
use crate::tools::{ToolError, ToolExecutor};
use crate::types::{ToolInvocation, Transcript, Turn};

/// Where the loop currently is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Ready for the next line of user input
    AwaitingUserInput,
    /// A request to the model is outstanding
    AwaitingModelResponse,
    /// A tool invocation is outstanding
    ExecutingTool,
    /// A fatal error ended the session; absorbing
    Terminated,
}

/// Errors that end the session
#[derive(Error, Debug)]
pub enum ChatError {
    /// The model request failed (transport, API, malformed response)
    #[error("model request failed: {0}")]
    Provider(#[from] ProviderError),

    /// The tool provider failed at the connection/protocol level
    #[error("tool provider failed: {0}")]
    Tool(#[from] ToolError),

    /// The model kept requesting tools past the configured chain limit
    #[error("model requested more than {limit} consecutive tool calls without producing text")]
    ToolCallLimit { limit: usize },

    /// The session already terminated; no further input is accepted
    #[error("session is terminated")]
    Terminated,
}

/// One interactive conversation with the model
pub struct ChatSession {
    provider: Arc<dyn ChatProvider>,
    tools: Arc<dyn ToolExecutor>,
    transcript: Transcript,
    state: LoopState,
    /// Upper bound on consecutive tool calls within one exchange
    max_tool_calls: usize,
    logger: Arc<dyn Logger>,
}

impl ChatSession {
    /// Create a session with an empty transcript
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        tools: Arc<dyn ToolExecutor>,
        max_tool_calls: usize,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            provider,
            tools,
            transcript: Transcript::new(),
            state: LoopState::AwaitingUserInput,
            max_tool_calls,
            logger,
        }
    }

    /// The conversation so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Feed one line of user input and run the turn cycle until the model
    /// produces text. Returns that text.
    ///
    /// Input is appended verbatim; an empty line is conversation content
    /// like any other. Any error terminates the session for good.
    pub async fn submit(&mut self, input: impl Into<String>) -> Result<String, ChatError> {
        if self.state == LoopState::Terminated {
            return Err(ChatError::Terminated);
        }

        self.transcript.push(Turn::user(input.into()));

        match self.exchange().await {
            Ok(text) => {
                self.state = LoopState::AwaitingUserInput;
                Ok(text)
            }
            Err(e) => {
                self.state = LoopState::Terminated;
                Err(e)
            }
        }
    }

    /// One full exchange: re-send until the model answers with text,
    /// executing at most `max_tool_calls` chained tool requests in between.
    async fn exchange(&mut self) -> Result<String, ChatError> {
        let mut tool_calls = 0usize;

        loop {
            self.state = LoopState::AwaitingModelResponse;
            self.logger.debug(&format!(
                "[ChatSession] Sending {} turns to {}",
                self.transcript.len(),
                self.provider.name()
            ));

            let reply = self
                .provider
                .send(&self.transcript, self.tools.descriptors())
                .await?;

            match reply {
                ModelReply::Text(text) => {
                    self.transcript.push(Turn::model(text.clone()));
                    return Ok(text);
                }
                ModelReply::ToolCall(call) => {
                    tool_calls += 1;
                    if tool_calls > self.max_tool_calls {
                        return Err(ChatError::ToolCallLimit {
                            limit: self.max_tool_calls,
                        });
                    }
                    self.run_tool(call).await?;
                }
            }
        }
    }

    /// Execute one tool call and append its result to the transcript.
    ///
    /// Invocation failures are reported back to the model as an error-tagged
    /// result turn; only a broken tool-provider connection ends the session.
    async fn run_tool(&mut self, call: ToolInvocation) -> Result<(), ChatError> {
        self.state = LoopState::ExecutingTool;
        self.logger
            .info(&format!("[ChatSession] Calling tool: {}", call.name));

        match self.tools.invoke(&call.name, call.arguments).await {
            Ok(text) => self.transcript.push(Turn::tool_result(call.name, text)),
            Err(e) if e.is_fatal() => return Err(ChatError::Tool(e)),
            Err(e) => {
                self.logger
                    .warn(&format!("[ChatSession] Tool failed: {}", e));
                self.transcript.push(Turn::tool_error(call.name, e.to_string()));
            }
        }

        Ok(())
    }
}
