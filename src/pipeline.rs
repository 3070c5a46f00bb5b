//! End-to-end run: load ids, resolve the catalog, download.
//!
//! Stages run strictly in order and each one owns the [`AddonSet`] while it
//! works on it. Batch-level failures end the run with a [`PipelineError`];
//! failures of a single addon are logged and only show up in the counters of
//! the returned [`RunSummary`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, instrument};

use crate::addon::{AddonRecord, AddonSet};
use crate::download::{CONNECT_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS, Downloader, HttpClient};
use crate::http::build_http_client;
use crate::input::{InputError, load_id_file};
use crate::workshop::{API_TIMEOUT_SECS, DEFAULT_API_BASE, WorkshopClient, WorkshopError};

/// Default standalone id list.
pub const DEFAULT_ADDONS_FILE: &str = "addons.txt";

/// Default collection id list.
pub const DEFAULT_COLLECTIONS_FILE: &str = "collections.txt";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "addons";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Standalone addon id list.
    pub addons_file: PathBuf,
    /// Collection id list.
    pub collections_file: PathBuf,
    /// Directory downloaded files are written into. Created if missing.
    pub output_dir: PathBuf,
    /// Base URL of the catalog API.
    pub api_base: String,
    /// TCP connect timeout for every request.
    pub connect_timeout: Duration,
    /// Time limit for one catalog call, response body included.
    pub api_timeout: Duration,
    /// Time limit for one file download, body included.
    pub download_timeout: Duration,
    /// Resolve everything but download nothing.
    pub dry_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            addons_file: PathBuf::from(DEFAULT_ADDONS_FILE),
            collections_file: PathBuf::from(DEFAULT_COLLECTIONS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            api_timeout: Duration::from_secs(API_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
            dry_run: false,
        }
    }
}

/// End-of-run counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct addon ids queued from both sources.
    pub queued: usize,
    /// Duplicate addon ids dropped while queueing.
    pub omitted: usize,
    /// Addons that resolved to a downloadable file.
    pub eligible: usize,
    /// Downloads that finished with status 200.
    pub completed: usize,
    /// Downloads that were attempted and failed.
    pub failed: usize,
    /// Eligible addons in id order. Only filled on a dry run.
    pub planned: Vec<AddonRecord>,
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An id list could not be read.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A batched catalog call failed.
    #[error(transparent)]
    Workshop(#[from] WorkshopError),

    /// The HTTP client could not be initialized.
    #[error("failed to initialize HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Runs the whole pipeline once.
///
/// # Errors
///
/// Returns [`PipelineError`] if an id list cannot be read, a batched catalog
/// call fails (including when no addon resolves to a downloadable file), or
/// the output directory cannot be created. Individual download failures are
/// not errors; they are counted in [`RunSummary::failed`].
#[instrument(skip_all)]
pub async fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let http = build_http_client(config.connect_timeout).map_err(PipelineError::HttpClient)?;
    let workshop = WorkshopClient::with_base_url(http.clone(), &config.api_base)?
        .with_timeout(config.api_timeout);

    let mut addons = AddonSet::new();

    let standalone = load_id_file(&config.addons_file)?;
    let counts = addons.merge_ids(standalone.ids.iter().copied());
    let mut omitted = counts.omitted + standalone.duplicate_count();
    info!(
        file = %config.addons_file.display(),
        added = counts.added,
        omitted,
        "Queued standalone addons"
    );

    let collections = load_id_file(&config.collections_file)?;
    if !collections.is_empty() {
        let report = workshop
            .resolve_collections(&collections.ids, &mut addons)
            .await?;
        info!(
            resolved = report.resolved,
            failed = report.failed,
            added = report.merged.added,
            omitted = report.merged.omitted,
            "Collections resolved"
        );
        omitted += report.merged.omitted;
    }

    let mut summary = RunSummary {
        queued: addons.len(),
        omitted,
        ..RunSummary::default()
    };
    if addons.is_empty() {
        info!("No addons to download");
        return Ok(summary);
    }
    info!(queued = summary.queued, "Resolving addon details");

    summary.eligible = workshop.resolve_addons(&mut addons).await?;

    if config.dry_run {
        summary.planned = addons.eligible().cloned().collect();
        info!(eligible = summary.eligible, "Dry run, nothing downloaded");
        return Ok(summary);
    }

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| PipelineError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;

    let client = HttpClient::new(http).with_timeout(config.download_timeout);
    let downloader = Downloader::new(client, config.output_dir.clone());
    let stats = downloader.run(&addons).await;

    summary.completed = stats.completed();
    summary.failed = stats.failed();
    Ok(summary)
}
