//! Typed catalog responses and the batch-level decode step.
//!
//! Both endpoints wrap their payload as
//! `{ "response": { "result": 1, "resultcount": N, ... } }`. Decoding yields a
//! `Result` instead of unwinding, so a malformed body is reported separately
//! from a network failure.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::WorkshopError;

/// Result code the service uses for success, both per batch and per entry.
pub(crate) const RESULT_OK: i64 = 1;

/// Maximum number of body bytes echoed into debug logs.
const BODY_PREVIEW_BYTES: usize = 512;

#[derive(Debug, Deserialize)]
struct BatchEnvelope<T> {
    response: BatchBody<T>,
}

/// The `response` object shared by both endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct BatchBody<T> {
    pub result: i64,
    #[serde(default)]
    pub resultcount: usize,
    #[serde(flatten)]
    pub details: T,
}

impl<T> BatchBody<T> {
    /// Checks the batch-level contract and hands back the payload.
    ///
    /// The batch must report `result == 1` and exactly `expected` results.
    pub(crate) fn into_validated(self, endpoint: &str, expected: usize) -> Result<T, WorkshopError> {
        if self.result != RESULT_OK {
            warn!(
                endpoint,
                result = self.result,
                resultcount = self.resultcount,
                "Batch reported failure"
            );
            return Err(WorkshopError::bad_result(
                endpoint,
                self.result,
                self.resultcount,
            ));
        }
        if self.resultcount != expected {
            warn!(
                endpoint,
                expected,
                resultcount = self.resultcount,
                "Batch result count does not match request"
            );
            return Err(WorkshopError::count_mismatch(
                endpoint,
                expected,
                self.resultcount,
            ));
        }
        Ok(self.details)
    }
}

/// Decodes a batch response body.
pub(crate) fn decode_batch<T: DeserializeOwned>(
    endpoint: &str,
    body: &[u8],
) -> Result<BatchBody<T>, WorkshopError> {
    serde_json::from_slice::<BatchEnvelope<T>>(body)
        .map(|envelope| envelope.response)
        .map_err(|e| {
            let preview_len = body.len().min(BODY_PREVIEW_BYTES);
            debug!(
                endpoint,
                body = %String::from_utf8_lossy(&body[..preview_len]),
                "undecodable response body"
            );
            WorkshopError::decode(endpoint, e.to_string())
        })
}

// ==================== GetCollectionDetails ====================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CollectionDetails {
    #[serde(default)]
    pub collectiondetails: Vec<CollectionEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionEntry {
    #[serde(deserialize_with = "de_u64")]
    pub publishedfileid: u64,
    pub result: i64,
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionChild {
    #[serde(deserialize_with = "de_u64")]
    pub publishedfileid: u64,
}

// ==================== GetPublishedFileDetails ====================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PublishedFileDetails {
    #[serde(default)]
    pub publishedfiledetails: Vec<PublishedFileEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublishedFileEntry {
    #[serde(deserialize_with = "de_u64")]
    pub publishedfileid: u64,
    pub result: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default, deserialize_with = "de_u64")]
    pub file_size: u64,
}

// The service sends 64-bit ids (and sometimes sizes) as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("'{text}' is not an unsigned integer"))),
    }
}
