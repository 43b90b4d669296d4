#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `STOCKDATA_RECORD=1`, the body is saved as
/// `tests/fixtures/{endpoint}_{key}.{ext}` (e.g., `news_all_p1.json` for page 1 of `/news/all`).
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _key: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("STOCKDATA_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_endpoint, _key, _ext, &text)
        {
            eprintln!("STOCKDATA_RECORD: failed to write fixture for {_key}: {e}");
        }
    }

    Ok(text)
}
