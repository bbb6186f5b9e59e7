//! Tool provider for the chat client
//!
//! An MCP server exposing exactly one tool, `create_post`: it formats the
//! status update that would be posted to X and returns it as text, without
//! ever touching the network. The X API credentials are still resolved from
//! the environment so a real integration only has to swap the tool body.

mod post_tool;

pub use post_tool::{CreatePostRequest, PostToolServer, XCredentials};
