use serde::Serialize;

use super::{SentimentCategory, SentimentScore};
use crate::news::Entity;

/// Aggregate view of the entity scores attached to one article.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SentimentSummary {
    /// Mean of the scored entities, `None` when no entity carries a score.
    pub mean: Option<SentimentScore>,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Entities that carry no score.
    pub unscored: usize,
}

impl SentimentSummary {
    #[must_use]
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut out = Self::default();
        let mut total = 0.0;
        for entity in entities {
            let Some(score) = entity.sentiment_score else {
                out.unscored += 1;
                continue;
            };
            total += score.value();
            match score.category() {
                SentimentCategory::Positive => out.positive += 1,
                SentimentCategory::Neutral => out.neutral += 1,
                SentimentCategory::Negative => out.negative += 1,
            }
        }
        let scored = out.scored();
        if scored > 0 {
            #[allow(clippy::cast_precision_loss)]
            let mean = total / scored as f64;
            out.mean = Some(SentimentScore::clamped(mean));
        }
        out
    }

    /// Number of entities that carry a score.
    #[must_use]
    pub const fn scored(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Category of the mean score.
    #[must_use]
    pub fn category(&self) -> Option<SentimentCategory> {
        self.mean.map(SentimentScore::category)
    }

    #[must_use]
    pub const fn count(&self, category: SentimentCategory) -> usize {
        match category {
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Neutral => self.neutral,
            SentimentCategory::Negative => self.negative,
        }
    }
}
