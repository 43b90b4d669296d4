use super::SentimentCategory;
use crate::news::Article;

/// Whether any scored entity of `article` falls into one of `allowed`.
///
/// Entities without a score are ignored, so an article with no scored entities never matches.
#[must_use]
pub fn matches_sentiment(article: &Article, allowed: &[SentimentCategory]) -> bool {
    article
        .entities
        .iter()
        .filter_map(|e| e.sentiment_score)
        .any(|s| allowed.contains(&s.category()))
}

/// Returns the articles that match `allowed`, in their original order.
#[must_use]
pub fn filter_articles(articles: &[Article], allowed: &[SentimentCategory]) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| matches_sentiment(a, allowed))
        .cloned()
        .collect()
}

/// Owned variant of [`filter_articles`]; drops non-matching articles in place.
#[must_use]
pub fn retain_by_sentiment(mut articles: Vec<Article>, allowed: &[SentimentCategory]) -> Vec<Article> {
    articles.retain(|a| matches_sentiment(a, allowed));
    articles
}
