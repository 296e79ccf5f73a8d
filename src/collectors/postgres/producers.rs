use std::io::Write;

use anyhow::Context;
use log::{debug, trace};

use super::session::PgSession;
use crate::collectors::file::stream_file;
use crate::collectors::task::{describe_error, CollectError, Producer};
use crate::config::RunConfig;

/// Runs a query on the run's default session
#[derive(Debug, Clone)]
pub struct QueryProducer {
    pub sql: String,
}

impl QueryProducer {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}

impl Producer for QueryProducer {
    fn produce(&self, cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        let rows = cfg.session()?.query_tsv(&self.sql, out)?;
        trace!("Query returned {} rows", rows);
        Ok(())
    }
}

/// Copies a file from the server's data directory
#[derive(Debug, Clone)]
pub struct ConfigFileProducer {
    pub filename: String,
}

impl ConfigFileProducer {
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into() }
    }
}

impl Producer for ConfigFileProducer {
    fn produce(&self, cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        let path = cfg.data_directory()?.join(&self.filename);
        stream_file(&path, out).map(|_| ())
    }
}

/// Runs a query against one specific database over a task-scoped session
#[derive(Debug, Clone)]
pub struct DatabaseQueryProducer {
    pub database: String,
    pub sql: String,
}

impl DatabaseQueryProducer {
    pub fn new(database: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            sql: sql.into(),
        }
    }
}

impl Producer for DatabaseQueryProducer {
    fn produce(&self, cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        let session = PgSession::connect(&cfg.connection, &self.database)?;
        let result = session
            .query_tsv(&self.sql, out)
            .context(format!("query on {} failed", self.database));

        if let Err(err) = session.close() {
            debug!("{}", describe_error(&err));
        }

        let rows = result?;
        trace!("Query on {} returned {} rows", self.database, rows);
        Ok(())
    }
}
