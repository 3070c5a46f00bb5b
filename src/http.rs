//! Shared HTTP client construction.
//!
//! One client is built per run and cloned into the catalog client and the
//! downloader. `reqwest::Client` is a handle to a shared pool, so clones are
//! cheap and requests reuse connections. Total time limits are applied per request
//! because catalog calls and file downloads need very different limits.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::user_agent;

/// Builds the HTTP client used for every request in a run.
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] if the TLS backend or system
/// configuration cannot be initialized.
pub fn build_http_client(connect_timeout: Duration) -> Result<Client, reqwest::Error> {
    debug!(connect_timeout_secs = connect_timeout.as_secs(), "building HTTP client");
    Client::builder()
        .connect_timeout(connect_timeout)
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_succeeds_with_defaults() {
        let client = build_http_client(Duration::from_secs(30));
        assert!(client.is_ok());
    }
}
