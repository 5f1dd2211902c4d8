use thiserror::Error;
use tracing::info;

use crate::completion_client::{CompletionClient, CompletionError};
use crate::news_client::{format_headlines, NewsClient, NewsError};

/// Everything that can sink one ticker's analysis. Failures stay local to
/// the ticker; the batch driver pattern-matches and moves on.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    News(#[from] NewsError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

fn build_prompt(ticker: &str, news_text: &str) -> String {
    format!(
        "Given the following news about stock {}:\n{}\n\n\
         Predict today's maximum and minimum price for this stock and suggest \
         whether to buy, sell, or take no action today.",
        ticker, news_text,
    )
}

pub struct Analyzer {
    news: NewsClient,
    completion: CompletionClient,
}

impl Analyzer {
    pub fn new(news: NewsClient, completion: CompletionClient) -> Self {
        Analyzer { news, completion }
    }

    /// Run the full pipeline for one ticker: fetch headlines, template the
    /// prompt, ask the model. Returns the model's reply verbatim (trimmed).
    pub async fn analyze(&self, ticker: &str) -> Result<String, AnalysisError> {
        let articles = self.news.fetch_latest(ticker).await?;
        let news_text = format_headlines(&articles);
        let prompt = build_prompt(ticker, &news_text);
        let analysis = self.completion.complete(&prompt).await?;

        info!(
            "Analyzed {} ({} articles, {} chars of analysis)",
            ticker,
            articles.len(),
            analysis.len(),
        );
        Ok(analysis)
    }
}
