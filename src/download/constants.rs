//! Timeout defaults for the transport layer.

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default time limit for one addon file, body included (5 minutes).
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
