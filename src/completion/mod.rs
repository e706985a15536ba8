//! Chat-completion client used to ask a language model for song suggestions.
//!
//! The client speaks the OpenAI `chat/completions` wire format, which most
//! hosted and self-hosted model servers accept. [`prompt`] turns a playlist
//! request into the system/user message pair and [`parse`] turns the model's
//! free-form answer back into [`Suggestions`](crate::types::Suggestions).

use reqwest::{Client, StatusCode};

use crate::{
    config::Settings,
    error::ApiError,
    spotify::read_json,
    types::{ChatMessage, ChatRequest, ChatResponse},
};

pub mod parse;
pub mod prompt;

pub use parse::parse_suggestions;
pub use prompt::CurationPrompt;

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 2000;

#[derive(Clone)]
pub struct CompletionClient {
    http: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CompletionClient {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            api_url: settings
                .completion_api_url
                .trim_end_matches('/')
                .to_string(),
            model: settings.completion_model.clone(),
            api_key: settings.completion_api_key().map(str::to_string),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Sends one system/user message pair and returns the text of the first
    /// choice. A choice without content yields an empty string.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotConfigured`] when no API key is set
    /// - [`ApiError::Status`] for non-success answers (bad key, quota, outage)
    /// - [`ApiError::Http`] / [`ApiError::Decode`] for transport and shape errors
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured("OPENAI_API_KEY"))?;

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let res: ChatResponse = read_json(response).await?;
        Ok(res
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    /// Checks the API key against the model listing endpoint and returns the
    /// status the service answered with.
    pub async fn probe(&self) -> Result<StatusCode, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured("OPENAI_API_KEY"))?;

        let response = self
            .http
            .get(format!("{}/models", self.api_url))
            .bearer_auth(api_key)
            .send()
            .await?;

        Ok(response.status())
    }
}
