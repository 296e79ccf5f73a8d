use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Platform;
use crate::constants::DEFAULT_POSTGRES_PORT;

/// Command-line arguments for radar.
///
/// Connection flags follow the psql conventions, which is why `-h` is the
/// host and help is only available as `--help`.
#[derive(Parser, Debug)]
#[clap(
    name = "radar",
    version,
    about = "Collect host and PostgreSQL diagnostics into a zip archive",
    disable_help_flag = true
)]
pub struct Args {
    /// Database host (default: $PGHOST or localhost)
    #[clap(short = 'h', long)]
    pub host: Option<String>,

    /// Database port
    #[clap(short = 'p', long, default_value_t = DEFAULT_POSTGRES_PORT)]
    pub port: u16,

    /// Database name (default: postgres)
    #[clap(short = 'd', long)]
    pub dbname: Option<String>,

    /// Database user (default: $PGUSER, then the current user)
    #[clap(short = 'U', long)]
    pub username: Option<String>,

    /// PostgreSQL data directory (default: asked of the server)
    #[clap(long)]
    pub data_dir: Option<PathBuf>,

    /// Skip system data collection
    #[clap(long)]
    pub skip_system: bool,

    /// Skip PostgreSQL data collection
    #[clap(long)]
    pub skip_postgres: bool,

    /// Verbose output; repeat (-vv) for per-task detail
    #[clap(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory the archive is written to (default: current directory)
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Catalog YAML file replacing the built-in task lists
    #[clap(short = 'c', long)]
    pub catalog: Option<PathBuf>,

    /// Print help
    #[clap(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Target operating system for a generated catalog.
#[derive(Clone, Debug, ValueEnum, PartialEq)]
pub enum TargetOS {
    /// Linux distributions
    Linux,
    /// Apple macOS
    #[value(name = "macos")]
    MacOS,
}

impl std::fmt::Display for TargetOS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetOS::Linux => write!(f, "linux"),
            TargetOS::MacOS => write!(f, "macos"),
        }
    }
}

impl From<&TargetOS> for Platform {
    fn from(os: &TargetOS) -> Self {
        match os {
            TargetOS::Linux => Platform::Linux,
            TargetOS::MacOS => Platform::MacOS,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the built-in task catalog as YAML
    InitCatalog {
        /// Path to the output catalog file
        #[clap(default_value = "catalog.yaml")]
        path: PathBuf,

        /// Target OS for the catalog (default: current OS)
        #[clap(long)]
        target_os: Option<TargetOS>,
    },
}
