use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum NewsError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be decoded as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API token removed.
        url: String,
    },

    /// The API token is missing or was rejected (HTTP 401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The account's daily request allowance is exhausted (HTTP 402).
    #[error("usage limit reached at {url}")]
    UsageLimit {
        /// The URL that returned the error, with the API token removed.
        url: String,
    },

    /// The API rate limit was hit (HTTP 429).
    #[error("rate limited at {url}")]
    RateLimited {
        /// The URL that returned the error, with the API token removed.
        url: String,
    },

    /// The server answered with a 5xx status.
    #[error("server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API token removed.
        url: String,
    },

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A sentiment score was outside `[0.0, 1.0]` or not a number.
    #[error("invalid sentiment score {0}: expected a value in [0.0, 1.0]")]
    InvalidScore(f64),

    /// A timestamp string could not be parsed.
    #[error("invalid date '{0}'")]
    InvalidDate(String),
}
