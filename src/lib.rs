//! # radar
//!
//! Collects host and PostgreSQL diagnostics into a single zip archive for
//! offline triage.
//!
//! ## Overview
//!
//! A run walks a static catalog of collection tasks: shell commands, host
//! files, SQL queries and files from the PostgreSQL data directory. Each task
//! streams its output straight into its own archive entry. Entries are only
//! created once a task writes its first byte, so tools or files missing on a
//! host leave no trace in the archive.
//!
//! ## Features
//!
//! - **Sequential, isolated tasks**: one failing task never stops the run
//! - **Skip classification**: missing tools and missing data are told apart
//!   from real failures
//! - **Streaming TSV**: query results are written row by row
//! - **Per-database collection**: catalog queries repeated for every
//!   connectable database
//! - **YAML catalogs**: the built-in task lists can be exported and replaced
//!
//! ## Usage
//!
//! ```no_run
//! use std::io::Cursor;
//! use radar::cli::Args;
//! use radar::collectors::runner::collect_all;
//! use radar::config::{RunConfig, TaskCatalog};
//! use clap::Parser;
//! use zip::ZipWriter;
//!
//! # fn main() -> anyhow::Result<()> {
//! let args = Args::parse_from(["radar", "--skip-postgres"]);
//! let cfg = RunConfig::from_args(&args)?;
//!
//! let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
//! let result = collect_all(&cfg, &TaskCatalog::default(), &mut zip);
//! zip.finish()?;
//!
//! println!("Collected {} items", result.collected());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Task outcomes and reports
//! - [`collectors`]: Tasks, producers, PostgreSQL access and the runner
//! - [`config`]: Run configuration and task catalogs
//! - [`utils`]: Lazy archive entries, TSV serialization, run summary
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Task outcomes and per-task reports
pub mod models;

/// Collection tasks, producers and the sequential runner
pub mod collectors;

/// Run configuration and task catalogs
pub mod config;

/// Archive entry, TSV and summary helpers
pub mod utils;

/// Application constants and configuration values
pub mod constants;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;
