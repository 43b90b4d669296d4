//! Recording helper for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    env::var("STOCKDATA_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

pub(crate) fn record_fixture(
    endpoint: &str,
    key: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = fixture_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{endpoint}_{key}.{ext}"));
    fs::write(&path, body)?;

    #[cfg(feature = "tracing")]
    tracing::info!(path = %path.display(), "recorded fixture");
    Ok(())
}
