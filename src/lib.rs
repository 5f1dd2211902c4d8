pub mod analyzer;
pub mod completion_client;
pub mod config;
pub mod news_client;
