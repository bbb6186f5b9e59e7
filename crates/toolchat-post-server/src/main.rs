//! Tool-provider process
//!
//! Binds a Unix socket and serves the create_post tool to any number of
//! connecting clients, one task per connection.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::net::UnixListener;

use toolchat_core::{ConsoleLogger, Logger};
use toolchat_post_server::{PostToolServer, XCredentials};

/// Must match the client's default socket path
const DEFAULT_SOCKET: &str = "/tmp/toolchat-mcp.sock";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::with_prefix("[toolchat-post-server]"));

    let socket_path =
        std::env::var("TOOLCHAT_MCP_SOCKET").unwrap_or_else(|_| DEFAULT_SOCKET.to_string());

    let credentials = XCredentials::from_env();
    if credentials.is_none() {
        logger.warn("X credentials not set; create_post is a stub and does not need them");
    }

    // A stale socket from a previous run would make bind fail.
    let _ = std::fs::remove_file(&socket_path);
    let listener = UnixListener::bind(&socket_path)?;
    logger.info(&format!("Listening on {}", socket_path));

    loop {
        let (stream, _addr) = listener.accept().await?;
        let server = PostToolServer::new(credentials.clone());
        let logger = Arc::clone(&logger);

        tokio::spawn(async move {
            match server.serve(stream).await {
                Ok(service) => {
                    if let Err(e) = service.waiting().await {
                        logger.error(&format!("Client session ended with error: {}", e));
                    }
                }
                Err(e) => logger.error(&format!("Client initialization failed: {}", e)),
            }
        });
    }
}
