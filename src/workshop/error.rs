//! Error types for catalog calls.
//!
//! Every variant is fatal to the batch it came from. Per-item problems
//! (a failed collection, a private item) are logged and never become errors.

use thiserror::Error;

/// Errors that fail a batched catalog call.
#[derive(Debug, Error)]
pub enum WorkshopError {
    /// The API base URL could not be parsed.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Network-level failure (DNS, connection refused, TLS).
    #[error("network error calling {endpoint}: {source}")]
    Transport {
        /// The endpoint that was called.
        endpoint: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The call did not finish within the catalog timeout.
    #[error("timeout calling {endpoint}")]
    Timeout {
        /// The endpoint that timed out.
        endpoint: String,
    },

    /// The service answered with something other than 200.
    #[error("HTTP {status} from {endpoint}")]
    HttpStatus {
        /// The endpoint that was called.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON shape.
    #[error("invalid response from {endpoint}: {reason}")]
    Decode {
        /// The endpoint that was called.
        endpoint: String,
        /// What did not match.
        reason: String,
    },

    /// The batch as a whole was reported as failed.
    #[error("{endpoint} reported result {result} (resultcount {result_count})")]
    BadResult {
        /// The endpoint that was called.
        endpoint: String,
        /// The overall result code (1 means success).
        result: i64,
        /// The reported result count.
        result_count: usize,
    },

    /// The service answered for a different number of ids than requested.
    #[error("{endpoint} returned {actual} results for {expected} requested ids")]
    CountMismatch {
        /// The endpoint that was called.
        endpoint: String,
        /// Number of ids sent.
        expected: usize,
        /// Reported result count.
        actual: usize,
    },

    /// Metadata resolved, but not a single item can be downloaded.
    #[error("no downloadable addons among {requested} requested from {endpoint}")]
    NoEligibleItems {
        /// The endpoint that was called.
        endpoint: String,
        /// Number of ids sent.
        requested: usize,
    },
}

impl WorkshopError {
    /// Creates an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a transport error, promoting reqwest timeouts to [`Self::Timeout`].
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.into(),
            }
        } else {
            Self::Transport {
                endpoint: endpoint.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates a failed-batch error.
    pub fn bad_result(endpoint: impl Into<String>, result: i64, result_count: usize) -> Self {
        Self::BadResult {
            endpoint: endpoint.into(),
            result,
            result_count,
        }
    }

    /// Creates a result count mismatch error.
    pub fn count_mismatch(endpoint: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::CountMismatch {
            endpoint: endpoint.into(),
            expected,
            actual,
        }
    }

    /// Creates a nothing-to-download error.
    pub fn no_eligible_items(endpoint: impl Into<String>, requested: usize) -> Self {
        Self::NoEligibleItems {
            endpoint: endpoint.into(),
            requested,
        }
    }

    /// Returns true if the failure happened below HTTP (no response at all).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}
