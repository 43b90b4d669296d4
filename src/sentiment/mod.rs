//! Sentiment categories, score validation, and article filtering.
//!
//! Scores are the StockData.org entity `sentiment_score` values, which live in `[0.0, 1.0]`.
//! Everything in this module is pure and synchronous.

mod filter;
mod lexicon;
mod summary;

pub use filter::{filter_articles, matches_sentiment, retain_by_sentiment};
pub use lexicon::lexicon_score;
pub use summary::SentimentSummary;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::NewsError;

/// Scores strictly above this are [`SentimentCategory::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.6;
/// Scores strictly below this are [`SentimentCategory::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = 0.4;

/// Three-bucket sentiment label derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    /// All categories, from most to least positive.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Lowercase name, as used by `Display` and `FromStr`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentCategory {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(NewsError::Data(format!("unknown sentiment category '{other}'"))),
        }
    }
}

/// Maps a raw score to its category.
///
/// `s > 0.6` is positive, `s < 0.4` is negative, and everything else (including both
/// thresholds) is neutral. Total over `f64`; NaN falls through to neutral. Use
/// [`try_classify`] or [`SentimentScore`] when the input is untrusted.
#[must_use]
pub fn classify(s: f64) -> SentimentCategory {
    if s > POSITIVE_THRESHOLD {
        SentimentCategory::Positive
    } else if s < NEGATIVE_THRESHOLD {
        SentimentCategory::Negative
    } else {
        SentimentCategory::Neutral
    }
}

/// Like [`classify`], but rejects scores outside `[0.0, 1.0]`.
///
/// # Errors
///
/// Returns [`NewsError::InvalidScore`] for values below 0, above 1, or NaN.
pub fn try_classify(s: f64) -> Result<SentimentCategory, NewsError> {
    SentimentScore::new(s).map(SentimentScore::category)
}

/// A sentiment score known to lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SentimentScore(f64);

impl SentimentScore {
    /// Validates `value`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::InvalidScore`] if `value` is NaN or outside `[0.0, 1.0]`.
    pub fn new(value: f64) -> Result<Self, NewsError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(NewsError::InvalidScore(value))
        }
    }

    // Callers guarantee a finite value; used for averages that may drift by an ulp.
    pub(crate) fn clamped(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn category(self) -> SentimentCategory {
        classify(self.0)
    }
}

impl TryFrom<f64> for SentimentScore {
    type Error = NewsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SentimentScore> for f64 {
    fn from(s: SentimentScore) -> Self {
        s.0
    }
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
