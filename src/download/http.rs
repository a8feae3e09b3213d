//! HTTP downloads.
//!
//! Responses are spooled into a temporary file rather than memory; the
//! Android command-line tools archive runs to well over 100 MB.

use crate::error::{BobError, Result};
use reqwest::blocking::Client;
use std::io::{Seek, SeekFrom};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Source of remote files.
pub trait Downloader {
    /// Fetch `url` into a temporary file positioned at its start.
    fn fetch(&self, url: &str) -> Result<NamedTempFile>;
}

/// [`Downloader`] over HTTP(S) with a blocking client.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader.
    ///
    /// Only connecting is time-limited; the transfer itself may take as
    /// long as it needs.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bob/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| {
                BobError::Other(anyhow::Error::new(e).context("Failed to build HTTP client"))
            })?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<NamedTempFile> {
        let download_error = |message: String| BobError::Download {
            url: url.to_string(),
            message,
        };

        tracing::debug!("Downloading {}", url);
        let mut response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| download_error(e.to_string()))?;

        let mut file = NamedTempFile::new()?;
        let bytes = response
            .copy_to(&mut file)
            .map_err(|e| download_error(e.to_string()))?;
        file.seek(SeekFrom::Start(0))?;

        tracing::debug!("Downloaded {} byte(s) from {}", bytes, url);
        Ok(file)
    }
}
