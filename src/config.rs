use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // News API
    pub news_api_key: String,
    pub news_api_url: String,
    pub news_page_size: u32,
    // Completion API
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub completion_model: String,
    // HTTP
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment. A missing NEWS_API_KEY is
    /// fatal here, before any ticker is processed; the completion key is
    /// allowed to be absent and is checked at the first completion call.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Don't fail if .env missing

        Ok(Config {
            news_api_key: env::var("NEWS_API_KEY")
                .context("NEWS_API_KEY environment variable is not set")?,
            news_api_url: env::var("NEWS_API_URL")
                .unwrap_or_else(|_| "https://newsapi.org".to_string()),
            news_page_size: env::var("NEWS_PAGE_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Failed to parse NEWS_PAGE_SIZE")?,
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Failed to parse REQUEST_TIMEOUT_SECS")?,
        })
    }
}
