use chrono::{TimeZone, Utc};
use tadawul_news::{
    Article, Entity, NewsError, SentimentCategory, SentimentScore, classify, filter_articles,
    try_classify,
};

use SentimentCategory::{Negative, Neutral, Positive};

fn scored(symbol: &str, score: f64) -> Entity {
    Entity {
        name: symbol.to_string(),
        symbol: symbol.to_string(),
        sentiment_score: Some(SentimentScore::new(score).unwrap()),
        exchange: Some("TADAWUL".into()),
        country: Some("sa".into()),
        industry: None,
        match_score: None,
    }
}

fn article(uuid: &str, title: &str, entities: Vec<Entity>) -> Article {
    Article {
        uuid: uuid.to_string(),
        title: title.to_string(),
        description: String::new(),
        snippet: None,
        url: format!("https://news.test/{uuid}"),
        image_url: None,
        language: Some("en".into()),
        source: Some("news.test".into()),
        published_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        entities,
    }
}

#[test]
fn classification_thresholds() {
    for s in [0.61, 0.75, 1.0] {
        assert_eq!(classify(s), Positive, "{s}");
    }
    for s in [0.0, 0.2, 0.39] {
        assert_eq!(classify(s), Negative, "{s}");
    }
    for s in [0.4, 0.5, 0.6] {
        assert_eq!(classify(s), Neutral, "{s}");
    }
}

#[test]
fn validated_classification_rejects_out_of_range() {
    assert!(matches!(try_classify(1.2), Err(NewsError::InvalidScore(_))));
    assert!(matches!(SentimentScore::new(-1.0), Err(NewsError::InvalidScore(_))));
    assert_eq!(try_classify(0.6).unwrap(), Neutral);
}

#[test]
fn filter_examples() {
    let a = article("a", "A", vec![scored("2222.SR", 0.8)]);
    let b = article("b", "B", vec![scored("2010.SR", 0.3)]);

    assert!(filter_articles(&[], &[Positive]).is_empty());
    assert!(filter_articles(&[article("e", "E", vec![])], &SentimentCategory::ALL).is_empty());

    let ab = vec![a.clone(), b.clone()];
    assert_eq!(filter_articles(&ab, &[Positive]), vec![a.clone()]);
    assert_eq!(filter_articles(&ab, &[Positive, Negative]), ab);
    assert!(filter_articles(&ab, &[Neutral]).is_empty());

    let ba = vec![b, a];
    assert_eq!(filter_articles(&ba, &[Positive, Negative]), ba);

    let once = filter_articles(&ab, &[Negative]);
    assert_eq!(filter_articles(&once, &[Negative]), once);
}

#[test]
fn filter_does_not_touch_input() {
    let v = vec![
        article("a", "A", vec![scored("2222.SR", 0.9)]),
        article("b", "B", vec![]),
    ];
    let snapshot = v.clone();
    let _ = filter_articles(&v, &[Negative]);
    assert_eq!(v, snapshot);
}

#[test]
fn comparison_score_is_advisory() {
    // Gloomy headline, upbeat entity score: the filter follows the entity.
    let a = article(
        "a",
        "Shares fell after the loss warning",
        vec![scored("2222.SR", 0.9)],
    );
    assert_eq!(a.comparison_score().unwrap().category(), Negative);
    assert_eq!(filter_articles(std::slice::from_ref(&a), &[Positive]).len(), 1);
    assert!(filter_articles(&[a], &[Negative]).is_empty());
}
