//! End-to-end tests: the real client stack against the real server over a
//! Unix socket.

use std::sync::Arc;

use rmcp::ServiceExt;
use serde_json::json;
use tokio::net::UnixListener;

use toolchat_core::{ArgumentError, Logger, McpClient, NoOpLogger, ToolError, ToolExecutor, ToolRegistry};
use toolchat_post_server::PostToolServer;

/// Bind a listener in a temp dir and serve one PostToolServer per connection
async fn start_server(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("mcp.sock");
    let listener = UnixListener::bind(&path).expect("bind test socket");

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                if let Ok(service) = PostToolServer::new(None).serve(stream).await {
                    let _ = service.waiting().await;
                }
            });
        }
    });

    path
}

async fn connect_registry(path: &std::path::Path) -> ToolRegistry {
    let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
    let client = McpClient::connect_unix(path, Arc::clone(&logger))
        .await
        .expect("connect to test server");
    ToolRegistry::discover(client, logger)
        .await
        .expect("discover tools")
}

#[tokio::test]
async fn test_discovery_translates_schema_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = start_server(&dir).await;
    let registry = connect_registry(&path).await;

    let descriptors = registry.descriptors();
    assert_eq!(descriptors.len(), 1);

    let tool = &descriptors[0];
    assert_eq!(tool.name, "create_post");
    assert!(!tool.description.is_empty());

    // inputSchema -> parameters: field name translated, values unchanged
    assert_eq!(tool.parameters["type"], "object");
    assert!(tool.parameters["properties"]["status"].is_object());
    assert_eq!(tool.parameters["properties"]["status"]["type"], "string");
    assert!(tool.parameters["required"]
        .as_array()
        .unwrap()
        .contains(&json!("status")));

    // Listing is idempotent: a second discovery sees the same sequence.
    let second = connect_registry(&path).await;
    assert_eq!(second.descriptors(), registry.descriptors());
}

#[tokio::test]
async fn test_invoke_returns_first_text_part() {
    let dir = tempfile::tempdir().unwrap();
    let path = start_server(&dir).await;
    let registry = connect_registry(&path).await;

    let text = registry
        .invoke("create_post", json!({ "status": "gm" }))
        .await
        .expect("invoke create_post");

    assert_eq!(text, "Post created (not sent to X): gm");
}

#[tokio::test]
async fn test_invalid_arguments_rejected_before_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let path = start_server(&dir).await;
    let registry = connect_registry(&path).await;

    let missing = registry.invoke("create_post", json!({})).await;
    assert!(matches!(
        missing,
        Err(ToolError::InvalidArguments {
            source: ArgumentError::MissingRequired { .. },
            ..
        })
    ));

    let wrong_type = registry
        .invoke("create_post", json!({ "status": 42 }))
        .await;
    assert!(matches!(
        wrong_type,
        Err(ToolError::InvalidArguments {
            source: ArgumentError::WrongType { .. },
            ..
        })
    ));
}

#[tokio::test]
async fn test_unknown_tool_is_forwarded_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = start_server(&dir).await;
    let registry = connect_registry(&path).await;

    let result = registry.invoke("delete_post", json!({})).await;
    assert!(result.is_err());
}
