//! Server configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the serving HTTP server.
///
/// # Example
///
/// ```
/// use casaval_serving::ServerConfig;
///
/// let config = ServerConfig::builder()
///     .host("0.0.0.0")
///     .port(8080)
///     .artifact_dir("./artifacts")
///     .data_path("./housing.csv")
///     .build();
/// assert_eq!(config.socket_addr(), "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to (default: "127.0.0.1").
    pub host: String,

    /// Port to listen on (default: 8080).
    pub port: u16,

    /// Directory containing `scaler.*` and `model.*` artifacts.
    pub artifact_dir: PathBuf,

    /// Path to the raw housing CSV backing the chart panels.
    pub data_path: PathBuf,

    /// Enable permissive CORS (default: true).
    pub enable_cors: bool,

    /// Chat side-channel configuration; `None` disables the chat endpoint.
    pub chat: Option<ChatConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            artifact_dir: PathBuf::from("./artifacts"),
            data_path: PathBuf::from("./housing.csv"),
            enable_cors: true,
            chat: None,
        }
    }
}

impl ServerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// The socket address string for binding.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration for the external chat assistant.
///
/// The provider is any OpenAI-compatible chat-completions endpoint; the API
/// key is read from the named environment variable at startup, never stored
/// in config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Model identifier sent to the provider.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout. The chat call blocks only its own request handler.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "CASAVAL_CHAT_API_KEY".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the artifact directory.
    pub fn artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.artifact_dir = dir.into();
        self
    }

    /// Set the dataset path.
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Enable or disable CORS.
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.config.enable_cors = enable;
        self
    }

    /// Enable the chat side-channel.
    pub fn chat(mut self, chat: ChatConfig) -> Self {
        self.config.chat = Some(chat);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ServerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ServerConfig::builder()
            .host("0.0.0.0")
            .port(9000)
            .artifact_dir("/models")
            .enable_cors(false)
            .build();
        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert_eq!(config.artifact_dir, PathBuf::from("/models"));
        assert!(!config.enable_cors);
        assert!(config.chat.is_none());
    }

    #[test]
    fn chat_config_serde_round_trip() {
        let chat = ChatConfig::default();
        let json = serde_json::to_string(&chat).unwrap();
        let back: ChatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timeout, chat.timeout);
        assert_eq!(back.endpoint, chat.endpoint);
    }
}
