//! LLM provider implementations
//!
//! The `ChatProvider` trait is the seam between the conversation loop and
//! whichever model service backs it. `GenaiProvider` covers the real APIs;
//! `MockProvider` scripts replies for tests.

mod error;
mod genai_adapter;
mod genai_provider;
mod mock;
mod traits;

pub use error::{ProviderError, ProviderResult};
pub use genai_adapter::TOOL_RESULT_PREFIX;
pub use genai_provider::GenaiProvider;
pub use mock::{MockProvider, RecordedRequest};
pub use traits::{ChatProvider, ModelReply};
