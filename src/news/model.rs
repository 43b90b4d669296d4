use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::{Asia::Riyadh, Tz};
use serde::{Deserialize, Serialize};

use crate::sentiment::{
    SentimentCategory, SentimentScore, SentimentSummary, lexicon_score, matches_sentiment,
};

/// A company referenced by an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Company name (e.g., "Saudi Arabian Oil Co").
    pub name: String,
    /// Ticker symbol (e.g., "2222.SR").
    pub symbol: String,
    /// Sentiment toward this entity within the article, when the API provides one.
    pub sentiment_score: Option<SentimentScore>,
    pub exchange: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    /// How strongly the article was matched to this entity.
    pub match_score: Option<f64>,
}

/// A single news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// A unique identifier for the article.
    pub uuid: String,
    /// The headline of the article.
    pub title: String,
    pub description: String,
    /// Short excerpt of the body, when provided.
    pub snippet: Option<String>,
    /// A direct link to the article.
    pub url: String,
    pub image_url: Option<String>,
    pub language: Option<String>,
    /// Publisher domain (e.g., "argaam.com").
    pub source: Option<String>,
    pub published_at: DateTime<Utc>,
    /// Companies mentioned, in the order the API returned them.
    pub entities: Vec<Entity>,
}

impl Article {
    /// Publication time in Riyadh local time.
    #[must_use]
    pub fn published_local(&self) -> DateTime<Tz> {
        self.published_at.with_timezone(&Riyadh)
    }

    /// Publication date (UTC).
    #[must_use]
    pub fn published_date(&self) -> NaiveDate {
        self.published_at.date_naive()
    }

    /// Ticker symbols of all entities, in order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.symbol.as_str())
    }

    /// Aggregate of the entity sentiment scores.
    #[must_use]
    pub fn sentiment(&self) -> SentimentSummary {
        SentimentSummary::from_entities(&self.entities)
    }

    /// Locally computed score from the title and description.
    ///
    /// Advisory only; filtering always uses the entity scores.
    #[must_use]
    pub fn comparison_score(&self) -> Option<SentimentScore> {
        lexicon_score(&format!("{} {}", self.title, self.description))
    }

    /// See [`matches_sentiment`].
    #[must_use]
    pub fn matches_sentiment(&self, allowed: &[SentimentCategory]) -> bool {
        matches_sentiment(self, allowed)
    }
}

/// Paging information returned alongside a page of articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsMeta {
    /// Total number of matching articles on the server.
    pub found: u64,
    /// Number of articles in this page, before any client-side filtering.
    pub returned: u32,
    pub limit: u32,
    pub page: u32,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsPage {
    pub meta: NewsMeta,
    pub articles: Vec<Article>,
}
