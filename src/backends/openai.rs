//! OpenAI-compatible chat completions client.
//!
//! Every model in the comparison set is served by the same hosted API, so a
//! single client parameterized by base URL and model name covers the whole
//! catalog as well as the judge.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole, Usage};
use crate::error::ArenaError;

/// Configuration for an OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// API key for authentication with the host.
    pub api_key: String,
    /// Base URL of the chat completions host.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// System prompt to guide model behavior.
    pub system: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for an OpenAI-compatible chat completions API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAICompatible {
    /// Shared configuration wrapped in Arc for cheap cloning.
    pub config: Arc<OpenAIConfig>,
    /// HTTP client for making requests.
    pub client: Client,
}

#[derive(Serialize)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    usage: Option<Usage>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    content: String,
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices.first().and_then(|c| {
            if c.message.content.is_empty() {
                None
            } else {
                Some(c.message.content.clone())
            }
        })
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl OpenAICompatible {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self::with_client(
            builder.build().expect("Failed to build reqwest Client"),
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            timeout_seconds,
            system,
        )
    }

    /// Creates a new client with a custom HTTP client.
    #[allow(clippy::too_many_arguments)]
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Self {
        Self {
            config: Arc::new(OpenAIConfig {
                api_key: api_key.into(),
                base_url: base_url.into(),
                model: model.into(),
                max_tokens,
                temperature,
                system,
                timeout_seconds,
            }),
            client,
        }
    }

    /// Returns a client for a different model on the same host, reusing the
    /// underlying HTTP connection pool.
    pub fn for_model(&self, model: impl Into<String>) -> Self {
        Self {
            config: Arc::new(OpenAIConfig {
                api_key: self.config.api_key.clone(),
                base_url: self.config.base_url.clone(),
                model: model.into(),
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                system: self.config.system.clone(),
                timeout_seconds: self.config.timeout_seconds,
            }),
            client: self.client.clone(),
        }
    }

    /// Returns a copy of this client with a different sampling temperature.
    pub fn with_temperature(&self, temperature: f32) -> Self {
        Self {
            config: Arc::new(OpenAIConfig {
                api_key: self.config.api_key.clone(),
                base_url: self.config.base_url.clone(),
                model: self.config.model.clone(),
                max_tokens: self.config.max_tokens,
                temperature: Some(temperature),
                system: self.config.system.clone(),
                timeout_seconds: self.config.timeout_seconds,
            }),
            client: self.client.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatible {
    /// Sends a chat request to the configured host.
    ///
    /// # Arguments
    ///
    /// * `messages` - The conversation history as a slice of chat messages
    ///
    /// # Returns
    ///
    /// The provider's response or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, ArenaError> {
        if self.config.api_key.is_empty() {
            return Err(ArenaError::AuthError("Missing API key".to_string()));
        }

        let mut chat_msgs: Vec<OpenAIChatMessage> = messages
            .iter()
            .map(|m| OpenAIChatMessage {
                role: match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &m.content,
            })
            .collect();

        if let Some(system) = &self.config.system {
            chat_msgs.insert(
                0,
                OpenAIChatMessage {
                    role: "system",
                    content: system,
                },
            );
        }

        let body = OpenAIChatRequest {
            model: &self.config.model,
            messages: chat_msgs,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Chat request payload: {}", json);
            }
        }

        let mut request = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body);

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let resp = request.send().await?;

        log::debug!("{} HTTP status: {}", self.config.model, resp.status());

        let resp = resp.error_for_status()?;

        let json_resp: OpenAIChatResponse = resp.json().await?;

        Ok(Box::new(json_resp))
    }
}
