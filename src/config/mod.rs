mod catalog;
mod default_catalogs;
mod run_config;

// Re-export catalog types
pub use catalog::{
    postgres_catalog,
    system_catalog,
    CommandSpec,
    ConfigFileSpec,
    FileSpec,
    Platform,
    QuerySpec,
    TaskCatalog,
};

// Re-export run configuration
pub use run_config::{ConnectionParams, RunConfig};
