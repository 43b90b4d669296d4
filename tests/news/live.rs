use tadawul_news::{NewsClientBuilder, SentimentCategory};

#[tokio::test]
#[ignore]
async fn live_news_smoke() {
    if !crate::common::live_enabled() {
        return;
    }

    let client = NewsClientBuilder::from_env().build().unwrap();
    let news = client.news().fetch().await.unwrap();

    // The seven-day window can legitimately be empty; check shape only.
    for article in &news {
        assert!(!article.uuid.is_empty());
        assert!(!article.title.is_empty());
        for entity in &article.entities {
            assert!(!entity.symbol.is_empty());
        }
    }

    let filtered = client
        .news()
        .sentiment(SentimentCategory::ALL)
        .fetch()
        .await
        .unwrap();
    for article in &filtered {
        assert!(article.sentiment().scored() > 0);
    }
}
