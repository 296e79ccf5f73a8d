use crate::collectors::task::CollectionTask;
use crate::config::{ConfigFileSpec, QuerySpec, TaskCatalog};
use crate::constants::{CATEGORY_DATABASE, CATEGORY_POSTGRESQL, DATABASE_PLACEHOLDER};

use super::producers::{ConfigFileProducer, DatabaseQueryProducer, QueryProducer};

/// One task per instance-level query
pub fn build_query_tasks(category: &str, specs: &[QuerySpec]) -> Vec<CollectionTask> {
    specs
        .iter()
        .map(|spec| {
            CollectionTask::new(
                category,
                spec.name.as_str(),
                spec.archive_path.as_str(),
                QueryProducer::new(spec.sql.as_str()),
            )
        })
        .collect()
}

/// One task per data directory file
pub fn build_config_file_tasks(category: &str, specs: &[ConfigFileSpec]) -> Vec<CollectionTask> {
    specs
        .iter()
        .map(|spec| {
            CollectionTask::new(
                category,
                spec.name.as_str(),
                spec.archive_path.as_str(),
                ConfigFileProducer::new(spec.filename.as_str()),
            )
        })
        .collect()
}

/// Every query for every database, grouped by database.
///
/// Task names are `<database>/<query>` and the placeholder in each archive
/// path is replaced with the database name.
pub fn build_database_tasks(databases: &[String], specs: &[QuerySpec]) -> Vec<CollectionTask> {
    let mut tasks = Vec::with_capacity(databases.len() * specs.len());

    for database in databases {
        for spec in specs {
            tasks.push(CollectionTask::new(
                CATEGORY_DATABASE,
                format!("{}/{}", database, spec.name),
                spec.archive_path.replace(DATABASE_PLACEHOLDER, database),
                DatabaseQueryProducer::new(database.as_str(), spec.sql.as_str()),
            ));
        }
    }

    tasks
}

/// Instance-level tasks of a catalog: queries, then config files
pub fn postgres_tasks(catalog: &TaskCatalog) -> Vec<CollectionTask> {
    let mut tasks = build_query_tasks(CATEGORY_POSTGRESQL, &catalog.queries);
    tasks.extend(build_config_file_tasks(CATEGORY_POSTGRESQL, &catalog.config_files));
    tasks
}
