use crate::collectors::command::CommandProducer;
use crate::collectors::file::FileProducer;
use crate::collectors::task::CollectionTask;
use crate::config::{CommandSpec, FileSpec, TaskCatalog};
use crate::constants::CATEGORY_SYSTEM;

/// One task per command entry
pub fn build_command_tasks(category: &str, specs: &[CommandSpec]) -> Vec<CollectionTask> {
    specs
        .iter()
        .map(|spec| {
            CollectionTask::new(
                category,
                spec.name.as_str(),
                spec.archive_path.as_str(),
                CommandProducer::new(spec.program.as_str(), spec.args.iter().map(String::as_str)),
            )
        })
        .collect()
}

/// One task per file entry
pub fn build_file_tasks(category: &str, specs: &[FileSpec]) -> Vec<CollectionTask> {
    specs
        .iter()
        .map(|spec| {
            CollectionTask::new(
                category,
                spec.name.as_str(),
                spec.archive_path.as_str(),
                FileProducer::new(spec.path.as_str()),
            )
        })
        .collect()
}

/// Host-level tasks of a catalog.
///
/// Platform commands and files come first, then the shared commands and files.
pub fn system_tasks(catalog: &TaskCatalog) -> Vec<CollectionTask> {
    let mut tasks = build_command_tasks(CATEGORY_SYSTEM, &catalog.commands);
    tasks.extend(build_file_tasks(CATEGORY_SYSTEM, &catalog.files));
    tasks.extend(build_command_tasks(CATEGORY_SYSTEM, &catalog.shared_commands));
    tasks.extend(build_file_tasks(CATEGORY_SYSTEM, &catalog.shared_files));
    tasks
}
