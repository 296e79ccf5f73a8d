use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::default_catalogs;
use crate::constants::DATABASE_PLACEHOLDER;

/// An external command whose output is archived
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub archive_path: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(name: &str, archive_path: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            archive_path: archive_path.into(),
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// A host file copied as is
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub name: String,
    pub archive_path: String,
    pub path: String,
}

impl FileSpec {
    pub fn new(name: &str, archive_path: &str, path: &str) -> Self {
        Self {
            name: name.into(),
            archive_path: archive_path.into(),
            path: path.into(),
        }
    }
}

/// A SQL query archived as TSV
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub name: String,
    pub archive_path: String,
    pub sql: String,
}

impl QuerySpec {
    pub fn new(name: &str, archive_path: &str, sql: &str) -> Self {
        Self {
            name: name.into(),
            archive_path: archive_path.into(),
            sql: sql.trim().into(),
        }
    }
}

/// A file inside the PostgreSQL data directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfigFileSpec {
    pub name: String,
    pub archive_path: String,
    pub filename: String,
}

impl ConfigFileSpec {
    pub fn new(filename: &str) -> Self {
        Self {
            name: filename.into(),
            archive_path: format!("postgresql/{}", filename),
            filename: filename.into(),
        }
    }
}

/// Operating system family a catalog targets
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    MacOS,
    /// Anything else: shared entries only
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOS,
            _ => Platform::Other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::MacOS => write!(f, "macos"),
            Platform::Other => write!(f, "other"),
        }
    }
}

/// The static list of everything a run may collect.
///
/// System entries run in this order: `commands`, `files`, then
/// `shared_commands` and `shared_files`. `database_queries` run once per
/// database; their archive paths carry a `{database}` placeholder.
///
/// Queries must be single statements: each is prepared once to learn its
/// column names, and the server refuses to prepare several commands at once.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskCatalog {
    pub version: String,
    pub description: String,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
    #[serde(default)]
    pub files: Vec<FileSpec>,
    #[serde(default)]
    pub shared_commands: Vec<CommandSpec>,
    #[serde(default)]
    pub shared_files: Vec<FileSpec>,
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
    #[serde(default)]
    pub config_files: Vec<ConfigFileSpec>,
    #[serde(default)]
    pub database_queries: Vec<QuerySpec>,
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::builtin(Platform::current())
    }
}

impl TaskCatalog {
    /// Built-in catalog for a platform: system entries plus PostgreSQL entries
    pub fn builtin(platform: Platform) -> Self {
        let system = system_catalog(platform);
        let postgres = postgres_catalog();

        TaskCatalog {
            version: "1.0".into(),
            description: format!("Default {} diagnostic catalog", platform),
            commands: system.commands,
            files: system.files,
            shared_commands: system.shared_commands,
            shared_files: system.shared_files,
            queries: postgres.queries,
            config_files: postgres.config_files,
            database_queries: postgres.database_queries,
        }
    }

    /// Load a catalog from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read catalog file: {}", path.display()))?;

        let catalog: TaskCatalog =
            serde_yaml::from_str(&content).context("Failed to parse YAML catalog")?;

        debug!("Loaded catalog from {}", path.display());
        Ok(catalog)
    }

    /// Save the catalog to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize catalog to YAML")?;

        fs::write(path, yaml)
            .context(format!("Failed to write catalog to {}", path.display()))?;

        info!("Saved catalog to {}", path.display());
        Ok(())
    }

    /// Reject catalogs whose tasks would collide in the archive.
    ///
    /// Names must be unique within each group, archive paths unique across
    /// instance-level entries, and every per-database path must contain the
    /// database placeholder.
    pub fn validate(&self) -> Result<()> {
        let system_names = self
            .commands
            .iter()
            .chain(&self.shared_commands)
            .map(|c| c.name.as_str())
            .chain(self.files.iter().chain(&self.shared_files).map(|f| f.name.as_str()));
        ensure_unique("system task name", system_names)?;

        let postgres_names = self
            .queries
            .iter()
            .map(|q| q.name.as_str())
            .chain(self.config_files.iter().map(|c| c.name.as_str()));
        ensure_unique("PostgreSQL task name", postgres_names)?;

        ensure_unique(
            "database task name",
            self.database_queries.iter().map(|q| q.name.as_str()),
        )?;

        let paths = self
            .commands
            .iter()
            .chain(&self.shared_commands)
            .map(|c| c.archive_path.as_str())
            .chain(self.files.iter().chain(&self.shared_files).map(|f| f.archive_path.as_str()))
            .chain(self.queries.iter().map(|q| q.archive_path.as_str()))
            .chain(self.config_files.iter().map(|c| c.archive_path.as_str()));
        ensure_unique("archive path", paths)?;

        ensure_unique(
            "database archive path",
            self.database_queries.iter().map(|q| q.archive_path.as_str()),
        )?;

        if let Some(query) = self
            .database_queries
            .iter()
            .find(|q| !q.archive_path.contains(DATABASE_PLACEHOLDER))
        {
            bail!(
                "database query '{}' archive path '{}' lacks the {} placeholder",
                query.name,
                query.archive_path,
                DATABASE_PLACEHOLDER
            );
        }

        if let Some(query) = self
            .queries
            .iter()
            .chain(&self.database_queries)
            .find(|q| is_multi_statement(&q.sql))
        {
            bail!("query '{}' must be a single SQL statement", query.name);
        }

        Ok(())
    }
}

// A trailing semicolon is fine; any other one separates statements.
fn is_multi_statement(sql: &str) -> bool {
    sql.trim().trim_end_matches(';').contains(';')
}

fn ensure_unique<'a>(what: &str, values: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            bail!("duplicate {} '{}' in catalog", what, value);
        }
    }
    Ok(())
}

/// System commands and files for a platform.
///
/// Shared entries land in the `shared_*` lists unless the platform already
/// defines an entry with the same name or archive path.
pub fn system_catalog(platform: Platform) -> TaskCatalog {
    let (commands, files) = match platform {
        Platform::Linux => (
            default_catalogs::linux_commands(),
            default_catalogs::linux_files(),
        ),
        Platform::MacOS => (
            default_catalogs::macos_commands(),
            default_catalogs::macos_files(),
        ),
        Platform::Other => (Vec::new(), Vec::new()),
    };

    let mut names: HashSet<String> = commands
        .iter()
        .map(|c| c.name.clone())
        .chain(files.iter().map(|f| f.name.clone()))
        .collect();
    let mut paths: HashSet<String> = commands
        .iter()
        .map(|c| c.archive_path.clone())
        .chain(files.iter().map(|f| f.archive_path.clone()))
        .collect();

    let shared_commands = default_catalogs::shared_commands()
        .into_iter()
        .filter(|c| names.insert(c.name.clone()) && paths.insert(c.archive_path.clone()))
        .collect();
    let shared_files = default_catalogs::shared_files()
        .into_iter()
        .filter(|f| names.insert(f.name.clone()) && paths.insert(f.archive_path.clone()))
        .collect();

    TaskCatalog {
        version: "1.0".into(),
        description: format!("{} system catalog", platform),
        commands,
        files,
        shared_commands,
        shared_files,
        queries: Vec::new(),
        config_files: Vec::new(),
        database_queries: Vec::new(),
    }
}

/// Instance-level queries, config files and per-database queries
pub fn postgres_catalog() -> TaskCatalog {
    let mut database_queries = default_catalogs::database_queries();
    database_queries.extend(default_catalogs::pg_statviz_queries());

    TaskCatalog {
        version: "1.0".into(),
        description: "PostgreSQL catalog".into(),
        commands: Vec::new(),
        files: Vec::new(),
        shared_commands: Vec::new(),
        shared_files: Vec::new(),
        queries: default_catalogs::postgres_queries(),
        config_files: default_catalogs::postgres_config_files(),
        database_queries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_linux_catalog_dedupes_shared_entries() {
        let catalog = system_catalog(Platform::Linux);
        let linux = default_catalogs::linux_commands();

        // every shared entry already exists on linux
        assert_eq!(catalog.commands, linux);
        assert_eq!(catalog.files, default_catalogs::linux_files());
        assert!(catalog.shared_commands.is_empty());
        assert!(catalog.shared_files.is_empty());
    }

    #[test]
    fn test_macos_catalog_appends_shared_entries() {
        let catalog = system_catalog(Platform::MacOS);
        let macos = default_catalogs::macos_commands();

        assert_eq!(catalog.commands, macos);
        assert_eq!(catalog.files, default_catalogs::macos_files());
        assert!(catalog.shared_commands.iter().any(|c| c.name == "uname"));
        assert!(catalog.shared_files.iter().any(|f| f.path == "/etc/hosts"));
        let hostname: Vec<_> = catalog
            .commands
            .iter()
            .chain(&catalog.shared_commands)
            .filter(|c| c.name == "hostname")
            .collect();
        assert_eq!(hostname.len(), 1);
        assert!(hostname[0].args.is_empty());
    }

    #[test]
    fn test_other_platform_uses_shared_only() {
        let catalog = system_catalog(Platform::Other);
        assert!(catalog.commands.is_empty());
        assert!(catalog.files.is_empty());
        assert_eq!(catalog.shared_commands, default_catalogs::shared_commands());
        assert_eq!(catalog.shared_files, default_catalogs::shared_files());
    }

    #[test]
    fn test_builtin_catalogs_are_valid() {
        for platform in [Platform::Linux, Platform::MacOS, Platform::Other] {
            let catalog = TaskCatalog::builtin(platform);
            catalog.validate().unwrap();
            assert_eq!(catalog.config_files.len(), 6);
            assert!(!catalog.queries.is_empty());
        }
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut catalog = TaskCatalog::builtin(Platform::Linux);
        catalog.commands.push(catalog.commands[0].clone());
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate system task name"));

        let mut catalog = TaskCatalog::builtin(Platform::Linux);
        let mut file = catalog.files[0].clone();
        file.name = "renamed".into();
        catalog.files.push(file);
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate archive path"));
    }

    #[test]
    fn test_validate_requires_database_placeholder() {
        let mut catalog = TaskCatalog::builtin(Platform::Linux);
        catalog
            .database_queries
            .push(QuerySpec::new("flat", "databases/flat.tsv", "SELECT 1"));
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_validate_rejects_multiple_statements() {
        let mut catalog = TaskCatalog::builtin(Platform::Linux);
        catalog
            .queries
            .push(QuerySpec::new("trailing", "postgresql/trailing.tsv", "SELECT 1;"));
        catalog.validate().unwrap();

        catalog
            .queries
            .push(QuerySpec::new("pair", "postgresql/pair.tsv", "SELECT 1; SELECT 2"));
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("'pair' must be a single SQL statement"));

        let mut catalog = TaskCatalog::builtin(Platform::Linux);
        catalog.database_queries.push(QuerySpec::new(
            "reset",
            "databases/{database}/reset.tsv",
            "SET work_mem = '4MB'; SELECT 1",
        ));
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_yaml_roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");

        let catalog = TaskCatalog::builtin(Platform::MacOS);
        catalog.save_to_yaml_file(&path).unwrap();
        let loaded = TaskCatalog::from_yaml_file(&path).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
version: "1.0"
description: "Minimal"
commands:
  - name: "uname"
    archive_path: "system/uname.out"
    program: "uname"
"#;
        let catalog: TaskCatalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.commands.len(), 1);
        assert!(catalog.commands[0].args.is_empty());
        assert!(catalog.files.is_empty());
        assert!(catalog.database_queries.is_empty());
        catalog.validate().unwrap();
    }

    #[test]
    fn test_missing_catalog_file() {
        let dir = TempDir::new().unwrap();
        let err = TaskCatalog::from_yaml_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }
}
