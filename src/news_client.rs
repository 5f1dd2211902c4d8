use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("news API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

// NewsAPI sends `description: null` for some articles; fold null and
// absent into the empty string at the deserialization boundary.
fn deserialize_null_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub description: String,
}

impl Article {
    pub fn headline_line(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// One line per article, in the order the API returned them.
pub fn format_headlines(articles: &[Article]) -> String {
    articles
        .iter()
        .map(Article::headline_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl NewsClient {
    pub fn new(base_url: &str, api_key: &str, page_size: u32, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build news HTTP client")?;

        Ok(NewsClient {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            page_size,
        })
    }

    /// Fetch the most recent articles mentioning `ticker`, newest first.
    /// The page size caps the result server-side; nothing is truncated locally.
    pub async fn fetch_latest(&self, ticker: &str) -> Result<Vec<Article>, NewsError> {
        let url = format!("{}/v2/everything", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", ticker),
                ("sortBy", "publishedAt"),
                ("apiKey", &self.api_key),
                ("pageSize", &self.page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::Api { status, body });
        }

        let parsed: NewsResponse = response.json().await?;
        debug!("Fetched {} articles for {}", parsed.articles.len(), ticker);
        Ok(parsed.articles)
    }
}
