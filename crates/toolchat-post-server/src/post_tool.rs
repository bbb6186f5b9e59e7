//! The create_post tool and its MCP server handler

use std::env;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};

/// API credentials for the X posting integration, read from the environment.
///
/// The stub never sends them anywhere.
#[derive(Debug, Clone)]
pub struct XCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl XCredentials {
    /// Read the full credential set; None if any variable is missing
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: env::var("TWITTER_API_KEY").ok()?,
            api_secret: env::var("TWITTER_API_SECRET").ok()?,
            access_token: env::var("TWITTER_ACCESS_TOKEN").ok()?,
            access_token_secret: env::var("TWITTER_ACCESS_TOKEN_SECRET").ok()?,
        })
    }
}

/// Arguments for create_post
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreatePostRequest {
    /// The status text to post
    pub status: String,
}

/// MCP server exposing the single create_post tool
#[derive(Clone)]
pub struct PostToolServer {
    /// Kept for the day create_post stops being a stub
    #[allow(dead_code)]
    credentials: Option<XCredentials>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PostToolServer {
    /// Create a server, optionally carrying X credentials
    pub fn new(credentials: Option<XCredentials>) -> Self {
        Self {
            credentials,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Create a post on X (formerly Twitter) with the given status text")]
    async fn create_post(
        &self,
        Parameters(CreatePostRequest { status }): Parameters<CreatePostRequest>,
    ) -> Result<CallToolResult, McpError> {
        // Deliberately does not call the X API: it reports what would have
        // been posted.
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Post created (not sent to X): {}",
            status
        ))]))
    }
}

#[tool_handler]
impl ServerHandler for PostToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Exposes a single create_post tool that formats (but does not send) \
                 a status update for X."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
