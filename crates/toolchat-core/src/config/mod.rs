//! Process configuration resolved from the environment
//!
//! There are no config files and no flags: the model, its API key, the
//! tool-provider address and the tool-call chain limit all come from
//! environment variables read once at startup.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Default model, matching the reference deployment
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Default Unix socket the tool provider listens on
pub const DEFAULT_MCP_SOCKET: &str = "/tmp/toolchat-mcp.sock";

/// Default upper bound on consecutive tool calls per exchange
pub const DEFAULT_MAX_TOOL_CALLS: usize = 8;

/// Mapping from provider names to the environment variables consulted for
/// their API key, in order
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("gemini", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    m.insert("anthropic", vec!["ANTHROPIC_API_KEY"]);
    m.insert("ollama", vec![]); // Ollama doesn't need an API key
    m
});

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no API key found for {provider}; set one of: {vars}")]
    MissingApiKey { provider: String, vars: String },

    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Where the tool provider lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolServerAddress {
    /// Unix socket path
    Unix(PathBuf),
    /// Streamable HTTP endpoint
    Http(String),
}

/// Everything the chat client needs to start
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Model identifier, optionally `provider/model` prefixed
    pub model: String,
    /// API key for the model's provider; None only for keyless providers
    pub api_key: Option<String>,
    /// Tool-provider address
    pub tool_server: ToolServerAddress,
    /// Upper bound on consecutive tool calls per exchange
    pub max_tool_calls: usize,
}

impl ChatConfig {
    /// Resolve the full configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let model = read_var("TOOLCHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let provider = provider_for_model(&model);

        let api_key = api_key_for_provider(provider);
        if api_key.is_none() && provider_requires_key(provider) {
            let vars = ENV_VAR_MAP
                .get(provider)
                .map(|v| v.join(", "))
                .unwrap_or_else(|| format!("{}_API_KEY", provider.to_uppercase()));
            return Err(ConfigError::MissingApiKey {
                provider: provider.to_string(),
                vars,
            });
        }

        let tool_server = match read_var("TOOLCHAT_MCP_URL") {
            Some(url) => ToolServerAddress::Http(url),
            None => ToolServerAddress::Unix(PathBuf::from(
                read_var("TOOLCHAT_MCP_SOCKET").unwrap_or_else(|| DEFAULT_MCP_SOCKET.to_string()),
            )),
        };

        let max_tool_calls = match read_var("TOOLCHAT_MAX_TOOL_CALLS") {
            Some(raw) => {
                let parsed: usize = raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "TOOLCHAT_MAX_TOOL_CALLS",
                    message: format!("expected a positive integer, got `{}`", raw),
                })?;
                if parsed == 0 {
                    return Err(ConfigError::Invalid {
                        var: "TOOLCHAT_MAX_TOOL_CALLS",
                        message: "must be at least 1".to_string(),
                    });
                }
                parsed
            }
            None => DEFAULT_MAX_TOOL_CALLS,
        };

        Ok(Self {
            model,
            api_key,
            tool_server,
            max_tool_calls,
        })
    }
}

/// Look up an API key for a provider from its mapped environment variables
pub fn api_key_for_provider(provider: &str) -> Option<String> {
    let vars = ENV_VAR_MAP.get(provider.to_lowercase().as_str())?;
    vars.iter().find_map(|var| read_var(var))
}

/// Infer the provider behind a model string: an explicit `provider/` prefix
/// wins, otherwise the model family name decides
pub fn provider_for_model(model: &str) -> &str {
    if let Some((provider, _)) = model.split_once('/') {
        return provider;
    }
    if model.starts_with("gpt") || model.starts_with("o1") {
        "openai"
    } else if model.starts_with("claude") {
        "anthropic"
    } else {
        // The reference deployment talks to Gemini
        "gemini"
    }
}

fn provider_requires_key(provider: &str) -> bool {
    !matches!(provider, "ollama")
}

/// Read an environment variable, treating empty values as unset
fn read_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_for_model() {
        assert_eq!(provider_for_model("gemini-1.5-pro"), "gemini");
        assert_eq!(provider_for_model("gpt-4o"), "openai");
        assert_eq!(provider_for_model("claude-3-opus"), "anthropic");
        assert_eq!(provider_for_model("openai/gpt-4"), "openai");
        assert_eq!(provider_for_model("ollama/llama3"), "ollama");
    }

    #[test]
    fn test_keyless_providers() {
        assert!(!provider_requires_key("ollama"));
        assert!(provider_requires_key("gemini"));
        assert!(provider_requires_key("openai"));
    }

    #[test]
    fn test_from_env_round_trip() {
        // One combined test so the shared variables are set and cleared in
        // a single place.
        env::set_var("GEMINI_API_KEY", "test-key-123");
        env::set_var("TOOLCHAT_MCP_SOCKET", "/tmp/test-toolchat.sock");
        env::set_var("TOOLCHAT_MAX_TOOL_CALLS", "3");

        let config = ChatConfig::from_env().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key.as_deref(), Some("test-key-123"));
        assert_eq!(
            config.tool_server,
            ToolServerAddress::Unix(PathBuf::from("/tmp/test-toolchat.sock"))
        );
        assert_eq!(config.max_tool_calls, 3);

        env::set_var("TOOLCHAT_MAX_TOOL_CALLS", "zero");
        assert!(matches!(
            ChatConfig::from_env(),
            Err(ConfigError::Invalid { .. })
        ));

        env::remove_var("GEMINI_API_KEY");
        env::remove_var("TOOLCHAT_MCP_SOCKET");
        env::remove_var("TOOLCHAT_MAX_TOOL_CALLS");
    }
}
