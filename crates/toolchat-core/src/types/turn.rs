//! Conversation transcript types

use serde::{Deserialize, Serialize};

/// One role-tagged unit of conversational history
///
/// Tool output is a first-class variant carrying the tool name, rather than
/// being smuggled in as user text. How each variant maps onto the wire roles
/// of a specific LLM protocol is the provider adapter's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    /// One line of user input, verbatim
    User { text: String },
    /// Text produced by the model
    Model { text: String },
    /// Output of a tool invocation, replayed to the model
    ToolResult {
        /// Name of the tool that produced this result
        tool: String,
        text: String,
        /// Whether the invocation failed and `text` describes the failure
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
}

impl Turn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Turn::User { text: text.into() }
    }

    /// Create a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Turn::Model { text: text.into() }
    }

    /// Create a successful tool-result turn
    pub fn tool_result(tool: impl Into<String>, text: impl Into<String>) -> Self {
        Turn::ToolResult {
            tool: tool.into(),
            text: text.into(),
            is_error: false,
        }
    }

    /// Create a failed tool-result turn
    pub fn tool_error(tool: impl Into<String>, text: impl Into<String>) -> Self {
        Turn::ToolResult {
            tool: tool.into(),
            text: text.into(),
            is_error: true,
        }
    }

    /// The textual content of this turn
    pub fn text(&self) -> &str {
        match self {
            Turn::User { text } | Turn::Model { text } | Turn::ToolResult { text, .. } => text,
        }
    }

    /// Whether this turn carries tool output
    pub fn is_tool_result(&self) -> bool {
        matches!(self, Turn::ToolResult { .. })
    }
}

/// Append-only ordered sequence of turns.
///
/// The transcript is replayed in full on every model request, so ordering
/// encodes the conversational history. The API deliberately offers no way
/// to remove or reorder entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recently appended turn
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether any turn has been appended yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
