use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{CommandFactory, Parser};
use log::{debug, error, info, warn, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use zip::ZipWriter;

use radar::cli::{Args, Commands};
use radar::collectors::postgres::PgSession;
use radar::collectors::runner::collect_all;
use radar::collectors::task::describe_error;
use radar::config::{Platform, RunConfig, TaskCatalog};
use radar::constants::{
    ARCHIVE_PREFIX, EXIT_COLLECT_ERROR, EXIT_NO_DATA, EXIT_USAGE_ERROR, TIMESTAMP_FORMAT,
};
use radar::models::PhaseResult;
use radar::utils::summary;

fn main() {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    if let Err(e) = initialize_logging(args.verbose) {
        eprintln!("{:#}", e);
        process::exit(EXIT_USAGE_ERROR);
    }

    // Handle subcommands
    if let Some(cmd) = &args.command {
        if let Err(e) = handle_subcommand(cmd) {
            error!("{:#}", e);
            process::exit(EXIT_USAGE_ERROR);
        }
        return;
    }

    process::exit(run(&args));
}

/// Run a collection and return the process exit code
fn run(args: &Args) -> i32 {
    let mut cfg = match RunConfig::from_args(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}", Args::command().render_usage());
            return EXIT_USAGE_ERROR;
        }
    };

    let catalog = match load_catalog(args.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_USAGE_ERROR;
        }
    };

    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let now = Local::now();
    let archive_name = format!(
        "{}-{}-{}.zip",
        ARCHIVE_PREFIX,
        hostname,
        now.format(TIMESTAMP_FORMAT)
    );

    if !cfg.is_verbose() {
        info!("Collecting diagnostic data...");
    }

    if !cfg.skip_postgres {
        connect_postgres(&mut cfg);
    }

    let archive_path = match output_path(args.output.as_deref(), &archive_name) {
        Ok(path) => path,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_COLLECT_ERROR;
        }
    };

    let result = match write_archive(&cfg, &catalog, &archive_path, &hostname, &now.to_rfc3339()) {
        Ok(result) => result,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_COLLECT_ERROR;
        }
    };

    if let Some(session) = cfg.session.take() {
        if let Err(e) = session.close() {
            debug!("{:#}", e);
        }
    }

    let collected = result.collected();
    summary::print_summary(&archive_path, collected, cfg.is_verbose());

    if collected == 0 {
        error!("No data collected - this may indicate a problem");
        return EXIT_NO_DATA;
    }
    0
}

/// Initialize logging for the given `-v` count.
///
/// Only the collector's own records are shown; driver internals stay quiet.
fn initialize_logging(verbose: u8) -> Result<()> {
    let log_level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str(env!("CARGO_CRATE_NAME"))
        .set_time_level(LevelFilter::Off)
        .build();
    TermLogger::init(log_level, config, TerminalMode::Mixed, ColorChoice::Auto)
        .context("Failed to initialize logger")?;
    Ok(())
}

/// Handle subcommands (init-catalog)
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitCatalog { path, target_os } => {
            let platform = target_os.as_ref().map_or_else(Platform::current, Platform::from);
            info!("Creating {} catalog at {}", platform, path.display());
            TaskCatalog::builtin(platform).save_to_yaml_file(path)?;
            info!("Catalog created successfully");
            Ok(())
        }
    }
}

/// Load the catalog file when given, the built-in catalog otherwise
fn load_catalog(path: Option<&Path>) -> Result<TaskCatalog> {
    match path {
        Some(path) => {
            let catalog = TaskCatalog::from_yaml_file(path)?;
            catalog
                .validate()
                .with_context(|| format!("Invalid catalog {}", path.display()))?;
            Ok(catalog)
        }
        None => Ok(TaskCatalog::default()),
    }
}

/// Open the default session; on failure continue with system collection only
fn connect_postgres(cfg: &mut RunConfig) {
    debug!("Connecting to PostgreSQL at {}", cfg.connection.describe());

    let connected = PgSession::connect(&cfg.connection, &cfg.connection.database)
        .and_then(|session| session.ping().map(|_| session));

    match connected {
        Ok(session) => {
            debug!("PostgreSQL connected");
            cfg.session = Some(session);
        }
        Err(e) => {
            error!("Could not connect to PostgreSQL: {}", describe_error(&e));
            error!("Continuing with system data collection only...");
            cfg.skip_postgres = true;
        }
    }
}

/// Resolve where the archive goes, creating the output directory if needed
fn output_path(output_dir: Option<&Path>, archive_name: &str) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            Ok(dir.join(archive_name))
        }
        None => Ok(PathBuf::from(archive_name)),
    }
}

/// Collect everything into a new archive at `path`
fn write_archive(
    cfg: &RunConfig,
    catalog: &TaskCatalog,
    path: &Path,
    hostname: &str,
    timestamp: &str,
) -> Result<PhaseResult> {
    debug!("Creating archive: {}", path.display());
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    debug!("Starting data collection...");
    let result = collect_all(cfg, catalog, &mut zip);

    match summary::create_collection_summary(hostname, timestamp, &result) {
        Ok(json) => {
            if let Err(e) = summary::write_summary_entry(&mut zip, &json) {
                warn!("{:#}", e);
            }
        }
        Err(e) => warn!("{:#}", e),
    }

    let mut writer = zip.finish().context("Failed to close archive")?;
    writer.flush().context("Failed to close archive")?;
    Ok(result)
}
