//! Sequential file downloads.
//!
//! This module streams resolved addons from their CDN URLs to disk.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Per-file time limit covering the whole body (5 minutes by default)
//! - Partial files are removed when a download fails
//! - Local names derived from the catalog file name, with an `<id>.addon`
//!   fallback

mod client;
mod constants;
mod engine;
mod error;
mod filename;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS};
pub use engine::{DownloadStats, Downloader};
pub use error::DownloadError;
pub use filename::{format_size, local_file_name};
