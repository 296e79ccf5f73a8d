//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read};

use clap::Parser;
use radar::cli::Args;
use radar::config::{RunConfig, TaskCatalog};

/// A catalog with nothing in it
pub fn empty_catalog() -> TaskCatalog {
    TaskCatalog {
        version: "1.0".to_string(),
        description: "integration test catalog".to_string(),
        commands: Vec::new(),
        files: Vec::new(),
        shared_commands: Vec::new(),
        shared_files: Vec::new(),
        queries: Vec::new(),
        config_files: Vec::new(),
        database_queries: Vec::new(),
    }
}

/// Configuration for a system-only run
pub fn system_only_config() -> RunConfig {
    RunConfig::from_args(&Args::parse_from(["radar", "--skip-postgres"])).unwrap()
}

/// Every entry of an in-memory archive as (name, content), in archive order
pub fn read_entries(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        entries.push((file.name().to_string(), content));
    }
    entries
}
