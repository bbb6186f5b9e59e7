//! Interactive chat client
//!
//! Reads lines from stdin, forwards them to the model, executes any tool the
//! model requests against the tool-provider process, and prints the model's
//! replies. No flags, no subcommands; configuration comes from the
//! environment.

use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use toolchat_core::{
    ChatConfig, ChatSession, ConsoleLogger, GenaiProvider, Logger, McpClient, ToolExecutor,
    ToolRegistry, ToolServerAddress,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());
    let config = ChatConfig::from_env()?;

    let client = match &config.tool_server {
        ToolServerAddress::Unix(path) => McpClient::connect_unix(path, Arc::clone(&logger)).await?,
        ToolServerAddress::Http(url) => McpClient::connect_http(url, Arc::clone(&logger)).await?,
    };
    println!("Connected to tool server");

    let registry = ToolRegistry::discover(client, Arc::clone(&logger)).await?;
    if registry.is_empty() {
        logger.warn("Tool server advertised no tools; continuing without function calling");
    }

    let provider = GenaiProvider::new(
        config.model.clone(),
        config.api_key.clone(),
        Arc::clone(&logger),
    );

    let mut session = ChatSession::new(
        Arc::new(provider),
        Arc::new(registry) as Arc<dyn ToolExecutor>,
        config.max_tool_calls,
        logger,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        // EOF ends the conversation cleanly
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = session.submit(line).await?;
        println!("AI: {}", reply);
    }

    Ok(())
}
