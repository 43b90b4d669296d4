use chrono::{TimeZone, Utc};
use httpmock::{Method::GET, MockServer};
use tadawul_news::{NewsError, SentimentCategory};

use crate::common::{TOKEN, client_for, fixture};

#[tokio::test]
async fn offline_news_default_query_and_decoding() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/news/all")
            .query_param("countries", "sa")
            .query_param("filter_entities", "true")
            .query_param("limit", "10")
            .query_param("page", "1")
            .query_param("api_token", TOKEN)
            .query_param_exists("published_after");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_all", "p1", "json"));
    });

    let client = client_for(&server);
    let page = client.news().fetch_page().await.unwrap();
    mock.assert();

    assert_eq!(page.meta.found, 57);
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.articles.len(), 4);

    let aramco = &page.articles[0];
    assert_eq!(aramco.symbols().collect::<Vec<_>>(), ["2222.SR", "2380.SR"]);
    assert_eq!(aramco.entities[0].industry.as_deref(), Some("Energy"));
    let score = aramco.entities[0].sentiment_score.unwrap();
    assert!((score.value() - 0.8225).abs() < 1e-12);
    assert_eq!(score.category(), SentimentCategory::Positive);
    assert!(aramco.entities[1].sentiment_score.is_none());
    assert_eq!(aramco.published_at, Utc.with_ymd_and_hms(2024, 5, 7, 6, 15, 0).unwrap());
    assert!(aramco.image_url.is_some());

    let sabic = &page.articles[1];
    assert_eq!(sabic.image_url, None, "empty image url is treated as absent");
    assert_eq!(sabic.snippet, None);
    assert_eq!(sabic.sentiment().category(), Some(SentimentCategory::Negative));

    assert!(page.articles[3].entities.is_empty());
}

#[tokio::test]
async fn offline_news_builder_configures_request() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/news/all")
            .query_param("countries", "sa,ae")
            .query_param("symbols", "2222.SR,2010.SR")
            .query_param("language", "ar")
            .query_param("filter_entities", "false")
            .query_param("limit", "4")
            .query_param("page", "3")
            .query_param("published_after", "2024-05-01T00:00");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"meta":{"found":0,"returned":0,"limit":4,"page":3},"data":[]}"#);
    });

    let client = client_for(&server);
    let articles = client
        .news()
        .countries(["sa", "ae"])
        .symbols(["2222.SR", "2010.SR"])
        .language("ar")
        .filter_entities(false)
        .limit(4)
        .page(3)
        .published_after(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn offline_news_sentiment_filter_keeps_order() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/news/all");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_all", "p1", "json"));
    });

    let client = client_for(&server);

    let positive = client
        .news()
        .sentiment([SentimentCategory::Positive])
        .fetch()
        .await
        .unwrap();
    assert_eq!(positive.len(), 1);
    assert!(positive[0].title.starts_with("Aramco"));

    let page = client
        .news()
        .sentiment([SentimentCategory::Negative, SentimentCategory::Neutral])
        .fetch_page()
        .await
        .unwrap();
    let titles: Vec<_> = page.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "SABIC swings to loss on weaker petrochemical margins",
            "Al Rajhi Bank to hold general assembly on May 20",
        ]
    );
    // Paging metadata describes the server page, not the filtered view.
    assert_eq!(page.meta.returned, 4);

    mock.assert_calls(2);
}

#[tokio::test]
async fn offline_news_multiple_pages_are_merged_in_order() {
    let server = MockServer::start();

    let p1 = server.mock(|when, then| {
        when.method(GET).path("/v1/news/all").query_param("page", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_all", "p1", "json"));
    });
    let p2 = server.mock(|when, then| {
        when.method(GET).path("/v1/news/all").query_param("page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("news_all", "p2", "json"));
    });

    let client = client_for(&server);
    let all = client.news().limit(4).fetch_pages(2).await.unwrap();
    p1.assert();
    p2.assert();

    // The market wrap appears on both pages and is kept once.
    assert_eq!(all.len(), 5);
    assert_eq!(all[4].symbols().collect::<Vec<_>>(), ["7010.SR"]);

    let negative = client
        .news()
        .limit(4)
        .sentiment([SentimentCategory::Negative])
        .fetch_pages(2)
        .await
        .unwrap();
    let symbols: Vec<_> = negative.iter().flat_map(|a| a.symbols()).collect();
    assert_eq!(symbols, ["2010.SR", "7010.SR"]);
}

#[tokio::test]
async fn offline_news_out_of_range_score_is_an_error() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/news/all");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"data":[{"uuid":"x","title":"t","url":"https://n.test/x",
                    "published_at":"2024-05-01T08:30:00.000000Z",
                    "entities":[{"symbol":"2222.SR","name":"Aramco","sentiment_score":-0.2}]}]}"#,
            );
    });

    let err = client_for(&server).news().fetch().await.unwrap_err();
    mock.assert();
    assert!(matches!(err, NewsError::InvalidScore(v) if (v + 0.2).abs() < 1e-12), "{err:?}");
}

#[tokio::test]
async fn offline_news_malformed_body_is_json_error() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/news/all");
        then.status(200).body("<html>maintenance</html>");
    });

    let err = client_for(&server).news().fetch().await.unwrap_err();
    mock.assert();
    assert!(matches!(err, NewsError::Json(_)), "{err:?}");
}
