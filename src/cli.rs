//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use workshop_dl::download::{CONNECT_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS};
use workshop_dl::pipeline::{DEFAULT_ADDONS_FILE, DEFAULT_COLLECTIONS_FILE, DEFAULT_OUTPUT_DIR};
use workshop_dl::workshop::{API_TIMEOUT_SECS, DEFAULT_API_BASE};
use workshop_dl::PipelineConfig;

/// Download workshop addons and collections in one batch.
///
/// Reads standalone addon ids and collection ids from two text files, resolves
/// them against the workshop API, and downloads every addon that has a public
/// file into the output directory.
#[derive(Parser, Debug)]
#[command(name = "workshop-dl")]
#[command(author, version, about)]
pub struct Args {
    /// File with standalone addon ids, whitespace separated
    #[arg(short = 'a', long = "addons", default_value = DEFAULT_ADDONS_FILE)]
    pub addons_file: PathBuf,

    /// File with collection ids, whitespace separated
    #[arg(short = 'c', long = "collections", default_value = DEFAULT_COLLECTIONS_FILE)]
    pub collections_file: PathBuf,

    /// Directory downloaded addons are written into (created if missing)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Base URL of the workshop web API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// TCP connect timeout in seconds (1-3600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: u64,

    /// Time limit for one API call in seconds, body included (1-3600)
    #[arg(long, default_value_t = API_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub api_timeout: u64,

    /// Time limit for one whole file download in seconds (1-3600)
    #[arg(long, default_value_t = DOWNLOAD_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub download_timeout: u64,

    /// Resolve everything and list the addons, but download nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output (also honors NO_COLOR)
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Returns the default log filter implied by `-q` and `-v`.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Converts the flags into the library run settings.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            addons_file: self.addons_file.clone(),
            collections_file: self.collections_file.clone(),
            output_dir: self.output_dir.clone(),
            api_base: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout),
            api_timeout: Duration::from_secs(self.api_timeout),
            download_timeout: Duration::from_secs(self.download_timeout),
            dry_run: self.dry_run,
        }
    }
}
