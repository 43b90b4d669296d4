mod api;
mod model;
mod wire;

pub use model::{Article, Entity, NewsMeta, NewsPage};

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use futures::future::try_join_all;

use crate::{
    NewsClient, NewsError,
    core::client::{CacheMode, DEFAULT_COUNTRY, DEFAULT_LIMIT, DEFAULT_LOOKBACK_DAYS, RetryConfig},
    sentiment::{SentimentCategory, retain_by_sentiment},
};

/// A builder for fetching news articles from `/news/all`.
///
/// Created by [`NewsClient::news`]. The defaults reproduce the dashboard query:
/// Saudi market, entity filtering on, ten articles, published in the last seven days.
#[derive(Debug, Clone)]
pub struct NewsBuilder {
    client: NewsClient,
    countries: Vec<String>,
    symbols: Vec<String>,
    language: Option<String>,
    filter_entities: bool,
    limit: u32,
    page: u32,
    published_after: Option<DateTime<Utc>>,
    lookback: TimeDelta,
    sentiment: Option<Vec<SentimentCategory>>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a new `NewsBuilder` with the dashboard defaults.
    #[must_use]
    pub fn new(client: &NewsClient) -> Self {
        Self {
            client: client.clone(),
            countries: vec![DEFAULT_COUNTRY.to_string()],
            symbols: Vec::new(),
            language: None,
            filter_entities: true,
            limit: DEFAULT_LIMIT,
            page: 1,
            published_after: None,
            lookback: TimeDelta::days(DEFAULT_LOOKBACK_DAYS),
            sentiment: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Replaces the country filter (ISO codes such as `"sa"`). Empty means all countries.
    #[must_use]
    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts results to articles mentioning these symbols (e.g., `"2222.SR"`).
    #[must_use]
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts results to one language code (e.g., `"en"`, `"ar"`).
    #[must_use]
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Whether the API should only return entities matching the other filters.
    #[must_use]
    pub const fn filter_entities(mut self, yes: bool) -> Self {
        self.filter_entities = yes;
        self
    }

    /// Sets the maximum number of articles per page.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the 1-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Only return articles published after `ts`. Overrides [`lookback`](Self::lookback).
    #[must_use]
    pub const fn published_after(mut self, ts: DateTime<Utc>) -> Self {
        self.published_after = Some(ts);
        self
    }

    /// Only return articles from the last `window` (default: seven days).
    #[must_use]
    pub const fn lookback(mut self, window: TimeDelta) -> Self {
        self.lookback = window;
        self.published_after = None;
        self
    }

    /// Keep only articles with at least one entity in one of `allowed`.
    ///
    /// Applied locally after decoding; the server is not asked to filter.
    #[must_use]
    pub fn sentiment(mut self, allowed: impl IntoIterator<Item = SentimentCategory>) -> Self {
        self.sentiment = Some(allowed.into_iter().collect());
        self
    }

    fn resolve_published_after(&self) -> Result<DateTime<Utc>, NewsError> {
        if let Some(ts) = self.published_after {
            return Ok(ts);
        }
        Utc::now().checked_sub_signed(self.lookback).ok_or_else(|| {
            NewsError::InvalidDate(format!("now minus lookback of {}", self.lookback))
        })
    }

    fn query(&self, page: u32, published_after: DateTime<Utc>) -> api::NewsQuery<'_> {
        api::NewsQuery {
            countries: &self.countries,
            symbols: &self.symbols,
            language: self.language.as_deref(),
            filter_entities: self.filter_entities,
            limit: self.limit,
            page,
            published_after,
        }
    }

    fn apply_sentiment(&self, articles: Vec<Article>) -> Vec<Article> {
        match &self.sentiment {
            Some(allowed) => {
                #[cfg(feature = "tracing")]
                let before = articles.len();
                let kept = retain_by_sentiment(articles, allowed);
                #[cfg(feature = "tracing")]
                tracing::debug!(before, after = kept.len(), "applied sentiment filter");
                kept
            }
            None => articles,
        }
    }

    /// Executes the request and returns one page, with its paging metadata.
    ///
    /// # Errors
    ///
    /// Returns a `NewsError` if no API token is configured, the lookback window
    /// reaches outside the representable date range, the request fails,
    /// the server answers with a non-success status, or the body cannot be decoded
    /// (including entity scores outside `[0.0, 1.0]`).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(page = self.page, limit = self.limit)))]
    pub async fn fetch_page(self) -> Result<NewsPage, NewsError> {
        let published_after = self.resolve_published_after()?;
        let mut page = api::fetch_page(
            &self.client,
            &self.query(self.page, published_after),
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await?;
        page.articles = self.apply_sentiment(page.articles);
        Ok(page)
    }

    /// Executes the request and returns the articles.
    ///
    /// # Errors
    ///
    /// See [`fetch_page`](Self::fetch_page).
    pub async fn fetch(self) -> Result<Vec<Article>, NewsError> {
        Ok(self.fetch_page().await?.articles)
    }

    /// Fetches `pages` consecutive pages concurrently, starting at the configured page.
    ///
    /// Articles come back in page order; an article repeated across pages is kept once.
    ///
    /// # Errors
    ///
    /// Fails if any page fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(start = self.page)))]
    pub async fn fetch_pages(self, pages: u32) -> Result<Vec<Article>, NewsError> {
        let first = self.page;
        let published_after = self.resolve_published_after()?;
        let queries: Vec<_> = (first..first.saturating_add(pages))
            .map(|p| self.query(p, published_after))
            .collect();
        let fetched = try_join_all(queries.iter().map(|q| {
            api::fetch_page(&self.client, q, self.cache_mode, self.retry_override.as_ref())
        }))
        .await?;

        let mut seen = HashSet::new();
        let articles = fetched
            .into_iter()
            .flat_map(|p| p.articles)
            .filter(|a| seen.insert(a.uuid.clone()))
            .collect();
        Ok(self.apply_sentiment(articles))
    }
}
