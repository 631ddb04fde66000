//! The chat side-channel.
//!
//! A free-text exchange with an external LLM service, fully isolated from
//! the prediction path: it has its own timeout, its own error domain, and
//! its failures surface as a local message without ever touching the
//! predictor. The backend sits behind a trait so handler tests can run
//! against a mock instead of the network.

use crate::config::ChatConfig;
use crate::error::{ServingError, ServingResult};
use crate::session::{ChatMessage, ChatRole};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The persona prefix sent with every exchange, matching the reference UI.
const SYSTEM_PROMPT: &str = "You are HouseBot, a friendly real-estate chatbot.";

/// An external chat-completion backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends the session history plus the new user message and returns the
    /// assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::ExternalService`] on any transport or
    /// provider failure; callers must treat that as recoverable.
    async fn reply(&self, history: &[ChatMessage], user_message: &str) -> ServingResult<String>;
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// `reqwest`-backed client for any OpenAI-compatible chat-completions
/// endpoint.
pub struct HttpChatClient {
    client: reqwest::Client,
    config: ChatConfig,
    api_key: String,
}

impl HttpChatClient {
    /// Builds the client, reading the API key from the configured
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::Config`] if the key variable is unset or the
    /// HTTP client cannot be constructed.
    pub fn new(config: ChatConfig) -> ServingResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ServingError::config(format!("{} is not set", config.api_key_env)))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServingError::config(e.to_string()))?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn build_messages<'a>(
        history: &'a [ChatMessage],
        user_message: &'a str,
    ) -> Vec<WireMessage<'a>> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: SYSTEM_PROMPT,
        });
        for msg in history {
            messages.push(WireMessage {
                role: match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &msg.text,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: user_message,
        });
        messages
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn reply(&self, history: &[ChatMessage], user_message: &str) -> ServingResult<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: Self::build_messages(history, user_message),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat request failed");
                ServingError::external(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "Chat provider returned an error");
            return Err(ServingError::external(format!(
                "provider returned {status}"
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ServingError::external(e.to_string()))?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ServingError::external("provider returned no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_assembly_keeps_history_order() {
        let history = vec![
            ChatMessage {
                role: ChatRole::User,
                text: "Is Inland cheaper?".to_string(),
            },
            ChatMessage {
                role: ChatRole::Assistant,
                text: "Usually, yes.".to_string(),
            },
        ];
        let messages = HttpChatClient::build_messages(&history, "By how much?");
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].content, "By how much?");
    }
}
