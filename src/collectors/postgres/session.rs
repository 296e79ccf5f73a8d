use std::cell::{OnceCell, RefCell};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::debug;
use sqlx::{Connection, PgConnection};
use tokio::runtime::{Builder, Runtime};

use super::cursor::PgCursor;
use crate::config::ConnectionParams;
use crate::constants::TEMPLATE_DATABASES;
use crate::utils::tsv::write_tsv;

const LIST_DATABASES_SQL: &str = "SELECT datname FROM pg_database WHERE datallowconn ORDER BY datname";
const DATA_DIRECTORY_SQL: &str = "SHOW data_directory";

/// One PostgreSQL connection with its own single-threaded runtime.
///
/// Calls block until the round trip completes. The connection is borrowed
/// per query, so a session can be shared by reference across sequential tasks.
pub struct PgSession {
    runtime: Runtime,
    conn: RefCell<PgConnection>,
    database: String,
    data_dir: OnceCell<PathBuf>,
}

impl PgSession {
    /// Connect to `database` with the given parameters
    pub fn connect(params: &ConnectionParams, database: &str) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create Tokio runtime")?;

        let options = params.connect_options(database);
        let conn = runtime
            .block_on(PgConnection::connect_with(&options))
            .context(format!(
                "connecting to {}:{}/{}",
                params.host, params.port, database
            ))?;

        debug!("Connected to {}:{}/{}", params.host, params.port, database);

        Ok(Self {
            runtime,
            conn: RefCell::new(conn),
            database: database.to_string(),
            data_dir: OnceCell::new(),
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Check that the server still answers
    pub fn ping(&self) -> Result<()> {
        let mut conn = self.borrow_conn()?;
        self.runtime
            .block_on(conn.ping())
            .context("PostgreSQL ping failed")
    }

    /// Run `sql` and stream its result into `out` as TSV, returning the row count
    pub fn query_tsv(&self, sql: &str, out: &mut dyn Write) -> Result<usize> {
        let mut conn = self.borrow_conn()?;
        let mut cursor = PgCursor::open(&self.runtime, &mut conn, sql)?;
        write_tsv(&mut cursor, out)
    }

    /// Databases accepting connections, template databases excluded
    pub fn list_databases(&self) -> Result<Vec<String>> {
        let mut conn = self.borrow_conn()?;
        let names: Vec<String> = self
            .runtime
            .block_on(sqlx::query_scalar(LIST_DATABASES_SQL).fetch_all(&mut *conn))
            .context("querying databases")?;

        Ok(names
            .into_iter()
            .filter(|name| !TEMPLATE_DATABASES.contains(&name.as_str()))
            .collect())
    }

    /// The server's data directory, asked once and then cached
    pub fn data_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = self.data_dir.get() {
            return Ok(dir.clone());
        }

        let dir: String = {
            let mut conn = self.borrow_conn()?;
            self.runtime
                .block_on(sqlx::query_scalar(DATA_DIRECTORY_SQL).fetch_one(&mut *conn))
                .context("detecting data directory")?
        };

        debug!("Detected data directory {}", dir);
        Ok(self.data_dir.get_or_init(|| PathBuf::from(dir)).clone())
    }

    /// Terminate the connection cleanly
    pub fn close(self) -> Result<()> {
        let conn = self.conn.into_inner();
        self.runtime
            .block_on(conn.close())
            .context(format!("closing connection to {}", self.database))
    }

    fn borrow_conn(&self) -> Result<std::cell::RefMut<'_, PgConnection>> {
        self.conn
            .try_borrow_mut()
            .map_err(|_| anyhow!("connection to {} is already in use", self.database))
    }
}
