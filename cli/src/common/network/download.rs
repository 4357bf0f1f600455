//! # File Downloads
//!
//! File: cli/src/common/network/download.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Streams an HTTP response body into a file without holding it in memory.
//! Redirects are followed (GitHub release assets redirect to a CDN).
//!
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use futures_util::StreamExt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};

/// Downloads `url` into `dest`, returning the number of bytes written.
#[instrument(skip(client, dest))]
pub async fn download_to_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to request {}", url))?;
    if !response.status().is_success() {
        return Err(anyhow!("Download of {} failed: {}", url, response.status()));
    }

    let mut file = std::fs::File::create(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.with_context(|| format!("Download of {} interrupted", url))?;
        file.write_all(&chunk)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    debug!("Downloaded {} bytes to {}", written, dest.display());
    Ok(written)
}
