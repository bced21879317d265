//! Raw byte access for dataset sources: local files, gzip files and URLs.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Fetches the body of `url` with a blocking HTTP GET.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads dataset bytes from a local path or an `http(s)://` URL, inflating
/// gzip content transparently.
#[tracing::instrument(skip_all, fields(source = %source))]
pub fn read_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(source).with_context(|| format!("failed to fetch dataset from {source}"))?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read dataset file {source}"))?
    };
    debug!(bytes = bytes.len(), "Dataset bytes received");

    if bytes.starts_with(&GZIP_MAGIC) {
        return gunzip(&bytes).with_context(|| format!("failed to decompress {source}"));
    }
    Ok(bytes)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    debug!(inflated = out.len(), "Gzip dataset inflated");
    Ok(out)
}
