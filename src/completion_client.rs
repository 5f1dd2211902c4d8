use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY environment variable is not set")]
    MissingCredential,
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("completion response contained no choices")]
    EmptyResponse,
}

// ─── OpenAI chat completion wire types ───

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct CompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build completion HTTP client")?;

        Ok(CompletionClient {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Send `prompt` as a single user message and return the trimmed text of
    /// the first choice. The credential is checked before any request goes out.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if self.api_key.is_empty() {
            return Err(CompletionError::MissingCredential);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyResponse)?;

        debug!("Completion returned {} chars", choice.message.content.len());
        Ok(choice.message.content.trim().to_string())
    }
}
