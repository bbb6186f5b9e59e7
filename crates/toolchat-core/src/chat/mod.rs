//! Conversation loop

mod session;

pub use session::{ChatError, ChatSession, LoopState};
