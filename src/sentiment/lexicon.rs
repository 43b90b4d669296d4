//! Word-list score computed locally from article text.
//!
//! Display-only: it is never consulted by the filters in this module.

use super::SentimentScore;

const POSITIVE_WORDS: &[&str] = &[
    "approval", "approved", "award", "awarded", "beat", "beats", "boost", "boosted", "dividend",
    "dividends", "expand", "expansion", "gain", "gained", "gains", "growth", "higher", "jump",
    "jumped", "outperform", "profit", "profits", "rally", "record", "rise", "rises", "rising",
    "rose", "strong", "stronger", "surge", "surged", "surges", "upgrade", "upgraded",
];

const NEGATIVE_WORDS: &[&str] = &[
    "cut", "cuts", "decline", "declined", "declines", "deficit", "downgrade", "downgraded", "drop",
    "dropped", "drops", "fall", "falling", "falls", "fell", "lawsuit", "loss", "losses", "lower",
    "miss", "missed", "penalty", "plunge", "plunged", "slump", "slumped", "suspend", "suspended",
    "warning", "weak", "weaker",
];

/// Scores `text` as `0.5 + 0.5 * (pos - neg) / (pos + neg)` over word-list hits.
///
/// Returns `None` when the text contains no listed word.
#[must_use]
pub fn lexicon_score(text: &str) -> Option<SentimentScore> {
    let (mut pos, mut neg) = (0u32, 0u32);
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if POSITIVE_WORDS.binary_search(&word.as_str()).is_ok() {
            pos += 1;
        } else if NEGATIVE_WORDS.binary_search(&word.as_str()).is_ok() {
            neg += 1;
        }
    }
    let hits = pos + neg;
    if hits == 0 {
        return None;
    }
    let balance = (f64::from(pos) - f64::from(neg)) / f64::from(hits);
    Some(SentimentScore::clamped(0.5 + 0.5 * balance))
}
