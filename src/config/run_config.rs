use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::cli::Args;
use crate::collectors::postgres::PgSession;
use crate::collectors::task::CollectError;
use crate::constants::{DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_USER};

/// Everything needed to open a PostgreSQL connection
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

impl ConnectionParams {
    /// Connect options for `database`, reusing host, port and credentials.
    ///
    /// TLS is disabled and no pgpass lookup happens: only the password
    /// taken from the environment is used.
    pub fn connect_options(&self, database: &str) -> PgConnectOptions {
        let options = PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(database)
            .ssl_mode(PgSslMode::Disable)
            .application_name(env!("CARGO_PKG_NAME"));

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }

    /// `host:port/database`, safe for logs
    pub fn describe(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Run-wide configuration shared read-only by every task
pub struct RunConfig {
    pub connection: ConnectionParams,
    /// Explicit PostgreSQL data directory; discovered from the server when absent
    pub data_dir: Option<PathBuf>,
    pub skip_system: bool,
    pub skip_postgres: bool,
    /// 0 = normal, 1 = verbose, 2+ = per-task detail
    pub verbosity: u8,
    /// Default database session, when PostgreSQL collection is active
    pub session: Option<PgSession>,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("connection", &self.connection)
            .field("data_dir", &self.data_dir)
            .field("skip_system", &self.skip_system)
            .field("skip_postgres", &self.skip_postgres)
            .field("verbosity", &self.verbosity)
            .field("connected", &self.session.is_some())
            .finish()
    }
}

impl RunConfig {
    /// Build from parsed arguments and the process environment
    pub fn from_args(args: &Args) -> Result<Self> {
        Self::from_args_with_env(args, |key| std::env::var(key).ok())
    }

    /// Build from parsed arguments, resolving fallbacks through `env`.
    ///
    /// Empty environment values count as unset.
    pub fn from_args_with_env<F>(args: &Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.is_empty());

        if args.skip_system && args.skip_postgres {
            bail!("cannot use --skip-system and --skip-postgres together (nothing would be collected)");
        }
        if args.skip_system && args.dbname.is_none() {
            bail!("--skip-system requires PostgreSQL database (-d flag)");
        }

        let host = args
            .host
            .clone()
            .or_else(|| lookup("PGHOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let user = args
            .username
            .clone()
            .or_else(|| lookup("PGUSER"))
            .or_else(|| lookup("USER"))
            .or_else(|| lookup("LOGNAME"))
            .unwrap_or_else(|| DEFAULT_USER.to_string());

        let database = match &args.dbname {
            Some(name) => name.clone(),
            None if !args.skip_postgres => DEFAULT_DATABASE.to_string(),
            None => String::new(),
        };

        Ok(RunConfig {
            connection: ConnectionParams {
                host,
                port: args.port,
                database,
                user,
                password: lookup("PGPASSWORD"),
            },
            data_dir: args.data_dir.clone(),
            skip_system: args.skip_system,
            skip_postgres: args.skip_postgres,
            verbosity: args.verbose,
            session: None,
        })
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity >= 1
    }

    pub fn is_very_verbose(&self) -> bool {
        self.verbosity >= 2
    }

    /// The run's default session, or a failure when PostgreSQL is not connected
    pub fn session(&self) -> Result<&PgSession, CollectError> {
        self.session
            .as_ref()
            .ok_or_else(|| CollectError::failure("PostgreSQL not initialized"))
    }

    /// The PostgreSQL data directory, from `--data-dir` or asked of the server once
    pub fn data_directory(&self) -> Result<PathBuf, CollectError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        self.session()?.data_directory().map_err(CollectError::Failure)
    }
}
