//! Sequential download engine.
//!
//! The [`Downloader`] walks an [`AddonSet`] in ascending id order and fetches
//! every eligible addon, one at a time, into a single output directory. A
//! failed download is logged and counted; it never stops the run.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::time::Duration;
//! use workshop_dl::{AddonSet, Downloader, HttpClient, build_http_client};
//!
//! # async fn example(addons: AddonSet) -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(build_http_client(Duration::from_secs(30))?);
//! let downloader = Downloader::new(client, PathBuf::from("addons"));
//! let stats = downloader.run(&addons).await;
//! println!("Completed: {}, Failed: {}", stats.completed(), stats.failed());
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::HttpClient;
use super::filename::format_size;
use crate::addon::{AddonRecord, AddonSet};

/// Statistics from one download pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    completed: usize,
    failed: usize,
    overwritten: usize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of successfully completed downloads.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the total number of downloads attempted (completed + failed).
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }

    /// Returns how many completed downloads replaced a file that an earlier
    /// addon wrote in the same pass.
    #[must_use]
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    fn increment_completed(&mut self) {
        self.completed += 1;
    }

    fn increment_failed(&mut self) {
        self.failed += 1;
    }

    fn increment_overwritten(&mut self) {
        self.overwritten += 1;
    }
}

/// Fetches eligible addons into an output directory, one at a time.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: HttpClient,
    output_dir: PathBuf,
}

impl Downloader {
    /// Creates a downloader writing into `output_dir`.
    ///
    /// The directory is expected to exist; the pipeline creates it before the
    /// download phase.
    #[must_use]
    pub fn new(client: HttpClient, output_dir: PathBuf) -> Self {
        Self { client, output_dir }
    }

    /// Downloads every eligible addon in ascending id order.
    ///
    /// Ineligible records are skipped silently. Each attempt ends as either
    /// completed or failed; there is no retry. Two addons that resolve to the
    /// same file name share one target; the later one wins and is counted in
    /// [`DownloadStats::overwritten`].
    #[instrument(skip_all, fields(output_dir = %self.output_dir.display()))]
    pub async fn run(&self, addons: &AddonSet) -> DownloadStats {
        let mut stats = DownloadStats::new();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for record in addons.eligible() {
            let target = self.output_dir.join(&record.file);
            let replaces_earlier = written.contains(&target);
            if replaces_earlier {
                warn!(
                    id = record.id(),
                    file = %record.file,
                    "File already written by another addon in this pass; it will be overwritten"
                );
            }

            if self.download_one(record, &target).await {
                stats.increment_completed();
                if replaces_earlier {
                    stats.increment_overwritten();
                }
                written.insert(target);
            } else {
                stats.increment_failed();
            }
        }

        info!(
            completed = stats.completed(),
            failed = stats.failed(),
            overwritten = stats.overwritten(),
            "Download pass finished"
        );
        stats
    }

    async fn download_one(&self, record: &AddonRecord, target: &Path) -> bool {
        let id = record.id();

        info!(
            id,
            "Downloading {} (size: {}, file: {})",
            record.name,
            format_size(record.size),
            record.file
        );

        match self.client.download_to_path(&record.url, target).await {
            Ok(bytes) => {
                info!(id, bytes, path = %target.display(), "Download completed");
                true
            }
            Err(error) => {
                warn!(id, name = %record.name, error = %error, "Download failed");
                false
            }
        }
    }
}
