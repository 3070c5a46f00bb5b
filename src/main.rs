//! CLI entry point for the workshop downloader.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use workshop_dl::{RunSummary, format_size, run};

mod cli;

use cli::Args;

/// Outcome reported to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => Self::SUCCESS,
            ProcessExit::Failure => Self::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(args.default_log_level(), is_no_color_requested(&args));

    match run_downloader(&args).await {
        Ok(exit) => exit.into(),
        Err(error) => {
            error!("{error:#}");
            ProcessExit::Failure.into()
        }
    }
}

async fn run_downloader(args: &Args) -> Result<ProcessExit> {
    info!("Workshop downloader {}", env!("CARGO_PKG_VERSION"));
    debug!(?args, "CLI arguments parsed");

    let config = args.to_pipeline_config();
    let summary = run(&config).await?;

    if config.dry_run {
        print_dry_run(&summary);
    }

    info!(
        queued = summary.queued,
        omitted = summary.omitted,
        eligible = summary.eligible,
        completed = summary.completed,
        failed = summary.failed,
        "Run finished"
    );
    Ok(ProcessExit::Success)
}

fn print_dry_run(summary: &RunSummary) {
    println!(
        "Dry run preview: {} queued, {} downloadable.",
        summary.queued, summary.eligible
    );
    for record in &summary.planned {
        println!(
            "- [{}] {} -> {} ({})",
            record.id(),
            record.name,
            record.file,
            format_size(record.size)
        );
    }
    println!("Dry run - no files downloaded");
}

fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

fn is_no_color_requested(args: &Args) -> bool {
    args.no_color || no_color_env_requested()
}

fn init_tracing(default_level: &str, no_color: bool) {
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .try_init();
}
