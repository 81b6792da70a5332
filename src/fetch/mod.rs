//! Retrieval of the raw station and trip data.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// GETs `url` and returns the body, failing on a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {} returned status {}", url, status);
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Fetched");
    Ok(bytes)
}

/// Loads `source` over HTTP(S) when it is a URL, otherwise from disk.
pub async fn fetch_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if is_remote(source) {
        fetch_bytes(client, source).await
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("Failed to read '{source}'"))
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
