use crate::archive::{download_file, list_project_files, list_projects};
use crate::config::ArchiveConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::{format_elapsed, size_in_mb};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Options taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    /// Download every listed file, not just print it
    pub download: bool,
    /// Optional TOML file overriding the built-in archive configuration
    pub config: Option<PathBuf>,
}

/// Counters reported once every project has been processed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub projects: usize,
    pub files_listed: usize,
    pub files_downloaded: usize,
    pub bytes_downloaded: u64,
}

fn command() -> Command<'static> {
    Command::new("gdc-mafs")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .arg(
            Arg::new("download")
                .short('d')
                .long("download")
                .help("Download the listed files too, into mafs/<project_id>/")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file overriding endpoints, filters and output settings")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

fn options_from_matches(matches: &ArgMatches) -> CliOptions {
    CliOptions {
        download: matches.get_one::<bool>("download").copied().unwrap_or(false),
        config: matches.get_one::<PathBuf>("config").cloned(),
    }
}

/// Parses command-line arguments from an explicit argument list.
///
/// # Errors
///
/// Returns `InvalidInput` for unknown flags or a `--config` without a value.
pub fn parse_args<I, T>(args: I) -> AppResult<CliOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command()
        .try_get_matches_from(args)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    Ok(options_from_matches(&matches))
}

/// Parses the process arguments and runs the listing (and optional download).
///
/// Listing lines go to standard output; logs go to standard error.
pub async fn cli() -> AppResult<()> {
    let matches = command().get_matches();
    let options = options_from_matches(&matches);
    debug!(?options, "CLI arguments parsed");

    let config = match &options.config {
        Some(path) => ArchiveConfig::from_toml_file(path)?,
        None => ArchiveConfig::default(),
    };

    let client = reqwest::Client::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_workflow(&client, &config, options.download, &mut out).await?;

    Ok(())
}

/// Message printed to standard error when a run fails.
pub fn error_report(err: &AppError) -> String {
    format!("Error: {err}")
}

/// Lists matching projects, then the files of every project, downloading them on request.
///
/// One tab-delimited line per file is written to `out` in server order, and flushed
/// before the file is downloaded. Every retained project is processed; the first
/// error aborts the run, leaving already printed lines and written files in place.
pub async fn run_workflow<W: Write>(
    client: &reqwest::Client,
    config: &ArchiveConfig,
    download: bool,
    out: &mut W,
) -> AppResult<RunSummary> {
    let started = Instant::now();
    let project_ids = list_projects(client, config).await?;

    let mut summary = RunSummary::default();
    for project_id in &project_ids {
        let records = list_project_files(client, config, project_id).await?;
        if records.is_empty() {
            debug!(project_id = %project_id, "No matching files");
        }

        for record in &records {
            writeln!(out, "{}", record.listing_line(project_id))?;
            out.flush()?;
            summary.files_listed += 1;

            if download {
                let destination = record.destination(config, project_id)?;
                debug!(
                    file_id = %record.file_id,
                    file_size = record.file_size,
                    md5sum = %record.md5sum,
                    "Downloading file"
                );
                let bytes = download_file(client, config, &record.file_id, &destination).await?;
                summary.files_downloaded += 1;
                summary.bytes_downloaded += bytes;
            }
        }

        summary.projects += 1;
    }

    print_summary(&summary, download, started);
    Ok(summary)
}

fn print_summary(summary: &RunSummary, download: bool, started: Instant) {
    let elapsed = format_elapsed(started.elapsed());
    if download {
        info!(
            projects = summary.projects,
            files = summary.files_listed,
            downloaded = summary.files_downloaded,
            size_mb = size_in_mb(summary.bytes_downloaded),
            elapsed = %elapsed,
            "All projects processed"
        );
    } else {
        info!(
            projects = summary.projects,
            files = summary.files_listed,
            elapsed = %elapsed,
            "All projects processed"
        );
    }
}
