//! Serve Command Implementation
//!
//! Starts the HTTP server: the prediction form, the JSON API, the chart-data
//! endpoints, and the optional chat side-channel.

use anyhow::Result;
use casaval_serving::{ChatConfig, ServerConfig};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Serve the trained model over HTTP
///
/// This command loads the scaler and model artifacts, loads the raw dataset
/// for the chart panels, and serves until interrupted. The chat assistant is
/// enabled only when `--chat` is passed and the API key variable is set.
///
/// # Example
///
/// ```bash
/// casaval serve \
///     --artifact-dir ./artifacts \
///     --data-path housing.csv \
///     --port 8080
/// ```
#[derive(Args, Debug, Clone)]
pub struct ServeCommand {
    /// Directory containing the scaler and model artifacts
    #[arg(long, short = 'd', env = "CASAVAL_ARTIFACT_DIR")]
    pub artifact_dir: PathBuf,

    /// Path to the raw housing CSV backing the chart panels
    #[arg(long, short = 'i', env = "CASAVAL_DATA_PATH")]
    pub data_path: PathBuf,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8080", env = "CASAVAL_PORT")]
    pub port: u16,

    /// Disable permissive CORS
    #[arg(long)]
    pub no_cors: bool,

    /// Enable the chat assistant
    #[arg(long)]
    pub chat: bool,

    /// Chat-completions endpoint URL
    #[arg(
        long,
        default_value = "https://api.openai.com/v1/chat/completions",
        env = "CASAVAL_CHAT_ENDPOINT"
    )]
    pub chat_endpoint: String,

    /// Model identifier sent to the chat provider
    #[arg(long, default_value = "gpt-4o-mini", env = "CASAVAL_CHAT_MODEL")]
    pub chat_model: String,
}

impl ServeCommand {
    /// Execute the serve command
    pub async fn run(&self) -> Result<()> {
        info!("Starting server...");
        info!("Artifact directory: {:?}", self.artifact_dir);
        info!("Listening on {}:{}", self.host, self.port);

        if !self.artifact_dir.exists() {
            anyhow::bail!(
                "Artifact directory does not exist: {:?} (run `casaval train` first)",
                self.artifact_dir
            );
        }

        let mut builder = ServerConfig::builder()
            .host(&self.host)
            .port(self.port)
            .artifact_dir(&self.artifact_dir)
            .data_path(&self.data_path)
            .enable_cors(!self.no_cors);

        if self.chat {
            builder = builder.chat(ChatConfig {
                endpoint: self.chat_endpoint.clone(),
                model: self.chat_model.clone(),
                ..ChatConfig::default()
            });
        }

        casaval_serving::serve(builder.build()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_command_defaults() {
        let cmd = ServeCommand {
            artifact_dir: PathBuf::from("./artifacts"),
            data_path: PathBuf::from("housing.csv"),
            host: "127.0.0.1".to_string(),
            port: 8080,
            no_cors: false,
            chat: false,
            chat_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
        };

        assert_eq!(cmd.port, 8080);
        assert!(!cmd.chat);
    }
}
