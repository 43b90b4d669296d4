//! tadawul-news: Saudi stock-market news from StockData.org, with entity sentiment.
//!
//! ```no_run
//! # use tadawul_news::{NewsClient, SentimentCategory};
//! # #[tokio::main]
//! # async fn main() -> Result<(), tadawul_news::NewsError> {
//! let client = NewsClient::builder().api_token("YOUR_TOKEN").build()?;
//! let articles = client
//!     .news()
//!     .sentiment([SentimentCategory::Positive])
//!     .fetch()
//!     .await?;
//! for a in &articles {
//!     println!("{} {}", a.published_date(), a.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod news;
pub mod sentiment;

pub use crate::core::{Backoff, CacheMode, NewsClient, NewsClientBuilder, NewsError, RetryConfig};
pub use news::{Article, Entity, NewsBuilder, NewsMeta, NewsPage};
pub use sentiment::{
    SentimentCategory, SentimentScore, SentimentSummary, classify, filter_articles,
    lexicon_score, retain_by_sentiment, try_classify,
};

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Intended for tests and small binaries; does nothing if a global subscriber is already set.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
