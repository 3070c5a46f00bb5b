//! Workshop Downloader Library
//!
//! This library resolves workshop addon and collection ids against the
//! workshop web API and downloads the resulting files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`input`] - Reading whitespace separated id lists
//! - [`addon`] - The deduplicated set of queued addons
//! - [`workshop`] - Batched collection and metadata resolution
//! - [`download`] - Sequential streaming downloads to disk
//! - [`pipeline`] - One complete run, from id files to files on disk

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod addon;
pub mod download;
pub mod http;
pub mod input;
pub mod pipeline;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;
pub mod workshop;

// Re-export commonly used types
pub use addon::{AddonRecord, AddonSet, MergeCounts};
pub use download::{
    DownloadError, DownloadStats, Downloader, HttpClient, format_size, local_file_name,
};
pub use http::build_http_client;
pub use input::{IdList, InputError, load_id_file, parse_ids};
pub use pipeline::{PipelineConfig, PipelineError, RunSummary, run};
pub use workshop::{CollectionReport, WorkshopClient, WorkshopError};
