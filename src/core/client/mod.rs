//! Public client surface + builder.
//! Internals are split into `retry` (backoff + send loop) and `constants` (UA + defaults).

mod constants;
mod retry;

pub(crate) use constants::{
    DEFAULT_COUNTRY, DEFAULT_LIMIT, DEFAULT_LOOKBACK_DAYS, PUBLISHED_AFTER_FORMAT,
};
pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::NewsError;
use crate::news::NewsBuilder;
use constants::{API_TOKEN_ENV, DEFAULT_BASE_API, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

/// Handle to the StockData.org API.
///
/// Build it once with [`NewsClient::builder`] and share it by reference or by cloning;
/// clones share the same HTTP connection pool and response cache.
#[derive(Clone)]
pub struct NewsClient {
    http: Client,
    base_api: Url,
    api_token: Option<String>,
    retry: RetryConfig,
    cache: Option<Arc<CacheStore>>,
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_api", &self.base_api.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("retry", &self.retry)
            .field("cache_enabled", &self.cache.is_some())
            .finish()
    }
}

impl NewsClient {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> NewsClientBuilder {
        NewsClientBuilder::default()
    }

    /// Starts a news request with the dashboard defaults: Saudi market,
    /// entity filtering on, ten articles, published within the last seven days.
    #[must_use]
    pub fn news(&self) -> NewsBuilder {
        NewsBuilder::new(self)
    }

    /// Whether responses are cached in memory.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops every cached response.
    pub async fn clear_cache(&self) {
        if let Some(store) = &self.cache {
            store.map.write().await.clear();
        }
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_api(&self) -> &Url {
        &self.base_api
    }

    pub(crate) fn api_token(&self) -> Result<&str, NewsError> {
        self.api_token
            .as_deref()
            .ok_or_else(|| NewsError::Auth("no API token configured".into()))
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(url.as_str())
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    /// Stores `body` under `url`; expired entries are evicted first.
    pub(crate) async fn cache_put(&self, url: &Url, body: &str) {
        let Some(store) = &self.cache else {
            return;
        };
        let now = Instant::now();
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at: now + store.default_ttl,
        };
        let mut guard = store.map.write().await;
        guard.retain(|_, e| e.expires_at > now);
        guard.insert(url.as_str().to_string(), entry);
    }
}

/// Returns `url` as a string with the `api_token` query parameter removed.
pub(crate) fn redact_url(url: &Url) -> String {
    let mut clean = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "api_token")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(kept);
    }
    clean.to_string()
}

/* ----------------------- Builder ----------------------- */

/// Configuration for a [`NewsClient`].
#[derive(Default)]
pub struct NewsClientBuilder {
    api_token: Option<String>,
    user_agent: Option<String>,
    base_api: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl NewsClientBuilder {
    /// A builder with the API token taken from `STOCKDATA_API_TOKEN`, if set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }

    /// Set the StockData.org API token.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://api.stockdata.org/v1/`).
    #[must_use]
    pub fn base_api(mut self, url: Url) -> Self {
        self.base_api = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable in-memory caching with a default TTL.
    /// If not set, caching is disabled.
    #[must_use]
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Replace the default retry policy used by every request.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed or the HTTP client fails to build.
    pub fn build(self) -> Result<NewsClient, NewsError> {
        let base_api = match self.base_api {
            Some(u) => ensure_trailing_slash(u),
            None => Url::parse(DEFAULT_BASE_API)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(NewsClient {
            http,
            base_api,
            api_token: self.api_token,
            retry: self.retry.unwrap_or_default(),
            cache: self.cache_ttl.map(|ttl| {
                Arc::new(CacheStore {
                    map: RwLock::new(HashMap::new()),
                    default_ttl: ttl,
                })
            }),
        })
    }
}

// `Url::join` replaces the last segment unless the base ends in '/'.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
