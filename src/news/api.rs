use chrono::{DateTime, NaiveDateTime, Utc};
use url::Url;

use crate::{
    core::{
        NewsClient, NewsError,
        client::{CacheMode, PUBLISHED_AFTER_FORMAT, RetryConfig, redact_url},
        net,
    },
    news::{
        model::{Article, Entity, NewsMeta, NewsPage},
        wire,
    },
    sentiment::SentimentScore,
};

/// Query parameters for `/news/all`, minus the token.
#[derive(Debug, Clone)]
pub(super) struct NewsQuery<'a> {
    pub(super) countries: &'a [String],
    pub(super) symbols: &'a [String],
    pub(super) language: Option<&'a str>,
    pub(super) filter_entities: bool,
    pub(super) limit: u32,
    pub(super) page: u32,
    pub(super) published_after: DateTime<Utc>,
}

impl NewsQuery<'_> {
    pub(super) fn url(&self, base: &Url) -> Result<Url, NewsError> {
        let mut url = base.join("news/all")?;
        {
            let mut q = url.query_pairs_mut();
            if !self.countries.is_empty() {
                q.append_pair("countries", &self.countries.join(","));
            }
            if !self.symbols.is_empty() {
                q.append_pair("symbols", &self.symbols.join(","));
            }
            if let Some(lang) = self.language {
                q.append_pair("language", lang);
            }
            q.append_pair(
                "filter_entities",
                if self.filter_entities { "true" } else { "false" },
            );
            q.append_pair("limit", &self.limit.to_string());
            q.append_pair("page", &self.page.to_string());
            q.append_pair(
                "published_after",
                &self.published_after.format(PUBLISHED_AFTER_FORMAT).to_string(),
            );
        }
        Ok(url)
    }
}

pub(super) async fn fetch_page(
    client: &NewsClient,
    query: &NewsQuery<'_>,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<NewsPage, NewsError> {
    let token = client.api_token()?;
    // The cache key never contains the token.
    let url = query.url(client.base_api())?;

    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&url).await
    {
        #[cfg(feature = "tracing")]
        tracing::trace!(url = %url, "news cache hit");
        return parse_news_body(&body);
    }

    let mut req_url = url.clone();
    req_url
        .query_pairs_mut()
        .append_pair("api_token", token);

    let req = client
        .http()
        .get(req_url.clone())
        .header("accept", "application/json");
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        let code = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(map_status(code, &redact_url(&req_url), &body));
    }

    let key = format!("p{}", query.page);
    let body = net::get_text(resp, "news_all", &key, "json").await?;
    let page = parse_news_body(&body)?;

    if cache_mode != CacheMode::Bypass {
        client.cache_put(&url, &body).await;
    }

    Ok(page)
}

fn map_status(code: u16, url: &str, body: &str) -> NewsError {
    let detail = serde_json::from_str::<wire::ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .map(|e| match (e.code, e.message) {
            (Some(c), Some(m)) => format!("{c}: {m}"),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => String::new(),
        })
        .filter(|s| !s.is_empty());

    let url = url.to_string();
    match code {
        401 | 403 => NewsError::Auth(detail.unwrap_or_else(|| format!("status {code} at {url}"))),
        402 => NewsError::UsageLimit { url },
        429 => NewsError::RateLimited { url },
        500..=599 => NewsError::ServerError { status: code, url },
        _ => NewsError::Status { status: code, url },
    }
}

pub(crate) fn parse_news_body(body: &str) -> Result<NewsPage, NewsError> {
    let envelope: wire::NewsEnvelope = serde_json::from_str(body)?;

    let raw = envelope.data.unwrap_or_default();
    let mut articles = Vec::with_capacity(raw.len());
    for item in raw {
        if let Some(article) = convert_article(item)? {
            articles.push(article);
        }
    }

    let returned = u32::try_from(articles.len()).unwrap_or(u32::MAX);
    let meta = envelope.meta.map_or(
        NewsMeta {
            found: u64::from(returned),
            returned,
            limit: 0,
            page: 1,
        },
        |m| NewsMeta {
            found: m.found.unwrap_or_default(),
            returned: m.returned.unwrap_or(returned),
            limit: m.limit.unwrap_or_default(),
            page: m.page.unwrap_or(1),
        },
    );

    Ok(NewsPage { meta, articles })
}

// Ok(None) drops articles without an id, headline, or usable timestamp.
fn convert_article(raw: wire::RawArticle) -> Result<Option<Article>, NewsError> {
    let (Some(uuid), Some(title), Some(published)) = (raw.uuid, raw.title, raw.published_at)
    else {
        return Ok(None);
    };

    let published_at = match parse_published_at(&published) {
        Ok(ts) => ts,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(uuid = %uuid, error = %_e, "skipping article with bad timestamp");
            return Ok(None);
        }
    };

    let entities = raw
        .entities
        .unwrap_or_default()
        .into_iter()
        .map(convert_entity)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    Ok(Some(Article {
        uuid,
        title,
        description: raw.description.unwrap_or_default(),
        snippet: raw.snippet.filter(|s| !s.is_empty()),
        url: raw.url.unwrap_or_default(),
        image_url: raw.image_url.filter(|s| !s.is_empty()),
        language: raw.language,
        source: raw.source,
        published_at,
        entities,
    }))
}

fn convert_entity(raw: wire::RawEntity) -> Result<Option<Entity>, NewsError> {
    let (Some(symbol), Some(name)) = (raw.symbol, raw.name) else {
        return Ok(None);
    };
    let sentiment_score = raw.sentiment_score.map(SentimentScore::new).transpose()?;
    Ok(Some(Entity {
        name,
        symbol,
        sentiment_score,
        exchange: raw.exchange,
        country: raw.country,
        industry: raw.industry,
        match_score: raw.match_score,
    }))
}

/// Parses `published_at`, which the API sends as RFC 3339 with microseconds
/// (e.g., `2024-05-01T08:30:00.000000Z`); offset-less values are taken as UTC.
pub(crate) fn parse_published_at(s: &str) -> Result<DateTime<Utc>, NewsError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| NewsError::InvalidDate(s.to_string()))
}
