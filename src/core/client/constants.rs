//! Centralized constants for default endpoints and UA.

/// Sent with every request unless overridden on the builder.
pub(crate) const USER_AGENT: &str = concat!("tadawul-news/", env!("CARGO_PKG_VERSION"));

/// StockData.org v1 API base (endpoint paths are joined onto it).
pub(crate) const DEFAULT_BASE_API: &str = "https://api.stockdata.org/v1/";

/// Environment variable read by `NewsClientBuilder::from_env`.
pub(crate) const API_TOKEN_ENV: &str = "STOCKDATA_API_TOKEN";

/// Country filter used when the caller does not set one (Saudi Arabia).
pub(crate) const DEFAULT_COUNTRY: &str = "sa";

/// Number of articles requested per page.
pub(crate) const DEFAULT_LIMIT: u32 = 10;

/// How far back `published_after` reaches by default.
pub(crate) const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Format expected by the `published_after` query parameter.
pub(crate) const PUBLISHED_AFTER_FORMAT: &str = "%Y-%m-%dT%H:%M";
