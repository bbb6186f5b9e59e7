//! Core types for the conversation loop
//!
//! This module contains the shared types used across the loop, the tool
//! registry and the providers.

mod tool;
mod turn;

pub use tool::{ArgumentError, ToolDescriptor, ToolInvocation};
pub use turn::{Transcript, Turn};
