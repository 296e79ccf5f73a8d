//! Sequential execution of collection tasks into one archive.
//!
//! Every task gets a fresh [`LazyZipEntry`] bound to its archive path, so the
//! archive holds an entry exactly for the tasks that wrote something. A task
//! error never stops the run: skips and failures are recorded, logged and
//! left behind.

use std::io::{Seek, Write};

use log::{debug, error, trace};
use zip::ZipWriter;

use crate::collectors::postgres::{build_database_tasks, postgres_tasks};
use crate::collectors::system::system_tasks;
use crate::collectors::task::{describe_error, CollectError, CollectionTask};
use crate::config::{RunConfig, TaskCatalog};
use crate::models::{Outcome, PhaseResult, TaskReport};
use crate::utils::lazy_zip::LazyZipEntry;

/// Run every enabled phase of a catalog into `zip`.
///
/// System tasks run first, then PostgreSQL instance tasks followed by the
/// per-database tasks. A failed database listing drops only the
/// per-database tasks.
pub fn collect_all<W: Write + Seek>(
    cfg: &RunConfig,
    catalog: &TaskCatalog,
    zip: &mut ZipWriter<W>,
) -> PhaseResult {
    let system = if cfg.skip_system {
        Vec::new()
    } else {
        system_tasks(catalog)
    };

    let mut postgres = Vec::new();
    if !cfg.skip_postgres {
        postgres = postgres_tasks(catalog);
        match cfg.session().map_err(anyhow::Error::from).and_then(|s| s.list_databases()) {
            Ok(databases) => {
                debug!("Found {} databases", databases.len());
                postgres.extend(build_database_tasks(&databases, &catalog.database_queries));
            }
            Err(e) => error!("Failed to generate database tasks: {}", describe_error(&e)),
        }
    }

    let runner = TaskRunner::new(cfg);
    let mut result = PhaseResult::default();

    if !system.is_empty() {
        debug!("Collecting {} system items", system.len());
        result.merge(runner.run(zip, &system));
    }

    if !postgres.is_empty() {
        debug!("Collecting {} PostgreSQL items", postgres.len());
        result.merge(runner.run(zip, &postgres));
    }

    result
}

/// Drives task lists against the run configuration
pub struct TaskRunner<'a> {
    cfg: &'a RunConfig,
}

impl<'a> TaskRunner<'a> {
    pub fn new(cfg: &'a RunConfig) -> Self {
        Self { cfg }
    }

    /// Run `tasks` in order, returning one report per task
    pub fn run<W: Write + Seek>(&self, zip: &mut ZipWriter<W>, tasks: &[CollectionTask]) -> PhaseResult {
        let mut result = PhaseResult::default();

        for task in tasks {
            let mut entry = LazyZipEntry::new(zip, &task.archive_path);
            let produced = task.producer.produce(self.cfg, &mut entry);
            let digest = entry.finish();

            let outcome = match produced {
                Ok(()) if digest.is_some() => {
                    trace!("collected {}", task.name);
                    Outcome::Produced
                }
                Ok(()) => {
                    trace!("empty {}", task.name);
                    Outcome::Empty
                }
                Err(CollectError::Skip(reason)) => {
                    trace!("unavailable {} ({})", task.name, reason);
                    Outcome::Skipped(reason)
                }
                Err(CollectError::Failure(err)) => {
                    let reason = describe_error(&err);
                    trace!("failed {}: {}", task.name, reason);
                    Outcome::Failed(reason)
                }
            };

            result.reports.push(TaskReport {
                name: task.name.clone(),
                category: task.category.clone(),
                archive_path: task.archive_path.clone(),
                outcome,
                archived: digest.is_some(),
                bytes_written: digest.as_ref().map_or(0, |d| d.bytes_written),
                sha256: digest.map(|d| d.sha256),
            });
        }

        result
    }
}
