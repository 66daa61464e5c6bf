use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Fetch a remote document into memory.
///
/// Blocks until the full body has been read; no timeout is applied.
/// Any non-2xx status is an error.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("server rejected download of {url}"))?;

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read body of {url}"))?;

    debug!(
        url,
        size_bytes = bytes.len(),
        sha256 = %fingerprint(&bytes),
        "downloaded"
    );
    Ok(bytes.to_vec())
}

/// Fetch a remote document and write it to `dest`, overwriting any
/// previous content.
pub fn fetch_to_file(url: &str, dest: &Path) -> Result<()> {
    let bytes = fetch_bytes(url)?;
    fs::write(dest, &bytes).with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(())
}

/// Hex-encoded SHA-256 of a downloaded payload.
///
/// The fingerprint depends only on the payload bytes, so identical
/// downloads log identical digests across runs.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
