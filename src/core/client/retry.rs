use std::time::Duration;

use rand::Rng;

use crate::core::NewsError;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Backoff {
    /// Delay to wait before retry number `attempt` (zero-based).
    pub(crate) fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let mut secs = (base.as_secs_f64() * factor.powi(exp)).min(max.as_secs_f64());
                if *jitter {
                    secs *= rand::rng().random_range(0.5..=1.5);
                    secs = secs.min(max.as_secs_f64());
                }
                if secs.is_finite() && secs > 0.0 {
                    Duration::from_secs_f64(secs)
                } else {
                    Duration::ZERO
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// A list of HTTP status codes that should trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 4,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(200),
                factor: 2.0,
                max: Duration::from_secs(3),
                jitter: true,
            },
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// A policy that sends each request exactly once.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Defines the behavior of the in-memory cache for an API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, fetch from the network
    /// and write the response to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}

impl super::NewsClient {
    /// Sends `req`, retrying according to `override_cfg` or the client's default policy.
    ///
    /// A response whose status is not in `retry_on_status` is returned as-is, even when it
    /// is not a success; status mapping is left to the caller.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        override_cfg: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, NewsError> {
        let cfg = override_cfg.unwrap_or(&self.retry);
        if !cfg.enabled {
            return Ok(req.send().await?);
        }

        let mut attempt = 0u32;
        loop {
            // Requests with streaming bodies cannot be replayed.
            let Some(this_try) = req.try_clone() else {
                return Ok(req.send().await?);
            };

            match this_try.send().await {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if attempt >= cfg.max_retries || !cfg.retry_on_status.contains(&code) {
                        return Ok(resp);
                    }
                    #[cfg(feature = "tracing")]
                    tracing::debug!(status = code, attempt, "retrying after retryable status");
                }
                Err(e) => {
                    let retryable = (cfg.retry_on_timeout && e.is_timeout())
                        || (cfg.retry_on_connect && e.is_connect());
                    if attempt >= cfg.max_retries || !retryable {
                        return Err(e.into());
                    }
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %e, attempt, "retrying after transport error");
                }
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}
