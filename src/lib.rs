//! gdc-mafs library
//!
//! This crate provides the core functionality for the `gdc-mafs` binary.
//! The crate root only declares modules; implementation and tests live in them.
//!
//! ## Overview
//!
//! - [`archive`] - Project search, file search and data retrieval against the GDC Legacy Archive
//! - [`cli`] - Command-line interface and the list-then-download workflow
//! - [`config`] - Endpoints, filter literals and output settings, optionally loaded from TOML
//! - [`models`] - Search envelopes, file records and the file search payload
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use gdc_mafs::{cli, config::ArchiveConfig, errors::AppResult};
//!
//! # async fn example() -> AppResult<()> {
//! let client = reqwest::Client::new();
//! let config = ArchiveConfig::default();
//! let mut out = std::io::stdout();
//!
//! // Print every open access MAF of every TCGA project, without downloading
//! let summary = cli::run_workflow(&client, &config, false, &mut out).await?;
//! println!("{} files", summary.files_listed);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod utils;
