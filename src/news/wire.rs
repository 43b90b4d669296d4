use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct NewsEnvelope {
    pub(crate) meta: Option<Meta>,
    pub(crate) data: Option<Vec<RawArticle>>,
}

#[derive(Deserialize)]
pub(crate) struct Meta {
    pub(crate) found: Option<u64>,
    pub(crate) returned: Option<u32>,
    pub(crate) limit: Option<u32>,
    pub(crate) page: Option<u32>,
}

#[derive(Deserialize)]
pub(crate) struct RawArticle {
    pub(crate) uuid: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) snippet: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) source: Option<String>,
    pub(crate) published_at: Option<String>,
    pub(crate) entities: Option<Vec<RawEntity>>,
}

#[derive(Deserialize)]
pub(crate) struct RawEntity {
    pub(crate) symbol: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) exchange: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) industry: Option<String>,
    pub(crate) match_score: Option<f64>,
    // Kept raw so range violations surface as `InvalidScore`, not a JSON error.
    pub(crate) sentiment_score: Option<f64>,
}

/// Body returned with non-2xx responses.
#[derive(Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: Option<ErrorBody>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: Option<String>,
    pub(crate) message: Option<String>,
}
