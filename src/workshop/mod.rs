//! Catalog resolution against the workshop web API.
//!
//! Two batched calls drive the pipeline:
//!
//! - [`WorkshopClient::resolve_collections`] expands collection ids into their
//!   member items and queues them in an [`AddonSet`](crate::AddonSet).
//! - [`WorkshopClient::resolve_addons`] fetches metadata for every queued item
//!   and marks the ones that can be downloaded.
//!
//! Each call sends all ids in one form-encoded POST and is validated as a
//! whole: the service must report `result == 1` and a `resultcount` equal to
//! the number of ids sent, otherwise the batch fails. Individual entries that
//! report failure are logged and skipped without failing the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use workshop_dl::{AddonSet, WorkshopClient, build_http_client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WorkshopClient::new(build_http_client(Duration::from_secs(30))?);
//! let mut addons = AddonSet::new();
//! addons.insert_if_absent(123_456_789);
//! let eligible = client.resolve_addons(&mut addons).await?;
//! println!("{eligible} addon(s) ready to download");
//! # Ok(())
//! # }
//! ```

mod collections;
mod details;
mod error;
mod response;

pub use collections::CollectionReport;
pub use error::WorkshopError;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use response::decode_batch;

/// Default public API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.steampowered.com";

/// Path of the collection membership endpoint.
pub const COLLECTION_DETAILS_PATH: &str = "/ISteamRemoteStorage/GetCollectionDetails/v1";

/// Path of the item metadata endpoint.
pub const FILE_DETAILS_PATH: &str = "/ISteamRemoteStorage/GetPublishedFileDetails/v1";

/// Default time limit for one catalog call (30 seconds).
pub const API_TIMEOUT_SECS: u64 = 30;

/// Client for the batched catalog endpoints.
#[derive(Debug, Clone)]
pub struct WorkshopClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl WorkshopClient {
    /// Creates a client for the public API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: default_base_url(),
            timeout: Duration::from_secs(API_TIMEOUT_SECS),
        }
    }

    /// Creates a client for a custom API base (mirrors, tests with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WorkshopError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self, WorkshopError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| WorkshopError::invalid_base_url(base_url, e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(WorkshopError::invalid_base_url(
                base_url,
                "URL cannot be used as a base",
            ));
        }
        Ok(Self {
            base_url: parsed,
            ..Self::new(client)
        })
    }

    /// Overrides the time limit for one catalog call, response body included.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Sends one batched call and returns its validated payload.
    #[instrument(level = "debug", skip(self, params))]
    async fn post_batch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        expected: usize,
    ) -> Result<T, WorkshopError> {
        let response = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .form(params)
            .send()
            .await
            .map_err(|e| WorkshopError::transport(endpoint, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "request status");
        if status != StatusCode::OK {
            return Err(WorkshopError::http_status(endpoint, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WorkshopError::transport(endpoint, e))?;

        decode_batch::<T>(endpoint, &body)?.into_validated(endpoint, expected)
    }
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base URL is valid")
}

/// Builds the form fields for a batched call.
///
/// The count field comes first, followed by one `publishedfileids[i]` per id
/// with `i` counting from zero.
pub(crate) fn batch_params<I>(count_key: &str, ids: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = u64>,
{
    let mut params = vec![(count_key.to_string(), String::new())];
    for (index, id) in ids.into_iter().enumerate() {
        params.push((format!("publishedfileids[{index}]"), id.to_string()));
    }
    params[0].1 = (params.len() - 1).to_string();
    params
}
