use anyhow::Result;
use clap::Parser;
use tracing::info;

use stock_analyst::analyzer::Analyzer;
use stock_analyst::completion_client::CompletionClient;
use stock_analyst::config::Config;
use stock_analyst::news_client::NewsClient;

/// Analyze stock tickers using recent news and an LLM
#[derive(Parser, Debug)]
#[command(name = "stock-analyst")]
#[command(about = "Fetch recent news for each ticker and ask an LLM for a price-range call")]
#[command(version)]
struct Args {
    /// Stock tickers to analyze, in order
    #[arg(required = true)]
    tickers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Fatal if NEWS_API_KEY is missing — no ticker is processed
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stock_analyst=info")),
        )
        .init();

    info!("Analyzing {} ticker(s)", args.tickers.len());

    let news = NewsClient::new(
        &config.news_api_url,
        &config.news_api_key,
        config.news_page_size,
        config.request_timeout_secs,
    )?;
    let completion = CompletionClient::new(
        &config.openai_api_url,
        &config.openai_api_key,
        &config.completion_model,
        config.request_timeout_secs,
    )?;
    let analyzer = Analyzer::new(news, completion);

    // One sequential pass; a ticker's failure never aborts the batch
    for ticker in &args.tickers {
        match analyzer.analyze(ticker).await {
            Ok(analysis) => println!("Analysis for {}:\n{}\n", ticker, analysis),
            Err(e) => eprintln!("Error analyzing {}: {}", ticker, e),
        }
    }

    Ok(())
}
