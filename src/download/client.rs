//! HTTP client wrapper for downloading addon files.
//!
//! This module provides the `HttpClient` struct which streams one response
//! body to a caller-chosen path and removes the partial file on failure.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::DOWNLOAD_TIMEOUT_SECS;
use super::error::DownloadError;

/// HTTP client for downloading files with streaming support.
///
/// Wraps the run-wide [`reqwest::Client`] and caps the total time of every
/// request, body included, with the download timeout.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::time::Duration;
/// use workshop_dl::{HttpClient, build_http_client};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new(build_http_client(Duration::from_secs(30))?);
/// let bytes = client
///     .download_to_path("https://cdn.example.com/ugc/123", Path::new("addons/map.gma"))
///     .await?;
/// println!("Wrote {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Wraps `client` with the default per-file time limit (5 minutes).
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-file time limit.
    ///
    /// The limit covers the whole request, from sending it to the last body
    /// byte, so it must allow for the largest expected file.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Downloads `url` into `file_path`, overwriting any existing file.
    ///
    /// The file is created before the request is sent. Only `200 OK` counts
    /// as success. On any failure after creation the partial file is removed.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if the URL is malformed, the file cannot be
    /// created or written, the request fails or times out, or the server
    /// answers with a status other than 200.
    #[instrument(skip(self, file_path), fields(path = %file_path.display()))]
    pub async fn download_to_path(&self, url: &str, file_path: &Path) -> Result<u64, DownloadError> {
        debug!("starting download");

        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let file = File::create(file_path)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        let result = self.fetch_into(file, url, file_path).await;

        if result.is_err() {
            debug!("cleaning up partial file after error");
            if let Err(error) = tokio::fs::remove_file(file_path).await {
                debug!(error = %error, "could not remove partial file");
            }
        }

        result
    }

    async fn fetch_into(
        &self,
        file: File,
        url: &str,
        file_path: &Path,
    ) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        stream_to_file(file, response, url, file_path).await
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}
