//! End-to-end collection runs into in-memory archives.
//!
//! These tests drive the full catalog pipeline with a handwritten catalog so
//! they do not depend on the tools installed on the test host.

mod common;

use std::fs;
use std::io::Cursor;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;
use zip::ZipWriter;

use radar::cli::Args;
use radar::collectors::runner::collect_all;
use radar::config::{FileSpec, QuerySpec, RunConfig};
use radar::models::Outcome;
use radar::utils::summary::{create_collection_summary, write_summary_entry};

use common::{empty_catalog, read_entries, system_only_config};

#[cfg(unix)]
mod commands {
    use super::*;
    use radar::config::CommandSpec;

    fn command_catalog() -> radar::config::TaskCatalog {
        let mut catalog = empty_catalog();
        catalog.commands = vec![
            CommandSpec::new("greeting", "system/greeting.out", "echo", &["hello"]),
            CommandSpec::new("silent", "system/silent.out", "true", &[]),
            CommandSpec::new("missing_tool", "system/missing.out", "radar-no-such-tool", &[]),
            CommandSpec::new("shell_not_found", "system/not_found.out", "sh", &["-c", "exit 127"]),
            CommandSpec::new(
                "no_data",
                "system/no_data.out",
                "sh",
                &["-c", "echo 'cat: /proc/x: No such file or directory' >&2; exit 1"],
            ),
            CommandSpec::new("broken", "system/broken.out", "sh", &["-c", "echo boom >&2; exit 2"]),
        ];
        catalog
    }

    #[test]
    fn test_only_produced_commands_reach_the_archive() {
        let cfg = system_only_config();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let result = collect_all(&cfg, &command_catalog(), &mut zip);
        let entries = read_entries(zip.finish().unwrap().into_inner());

        assert_eq!(entries, vec![("system/greeting.out".to_string(), b"hello\n".to_vec())]);
        assert_eq!(result.collected(), 1);
        assert_eq!(result.skipped(), 3);
        assert_eq!(result.failed(), 1);
    }

    #[test]
    fn test_outcomes_follow_catalog_order() {
        let cfg = system_only_config();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let result = collect_all(&cfg, &command_catalog(), &mut zip);

        let summary: Vec<(&str, &Outcome)> = result
            .reports
            .iter()
            .map(|r| (r.name.as_str(), &r.outcome))
            .collect();

        assert_eq!(summary[0], ("greeting", &Outcome::Produced));
        assert_eq!(summary[1], ("silent", &Outcome::Empty));
        assert!(matches!(summary[2].1, Outcome::Skipped(_)));
        assert!(matches!(summary[3].1, Outcome::Skipped(_)));
        assert!(matches!(summary[4].1, Outcome::Skipped(_)));
        match summary[5].1 {
            Outcome::Failed(reason) => assert!(reason.contains("boom")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

#[test]
fn test_files_are_copied_verbatim() -> Result<()> {
    let dir = TempDir::new()?;
    let content: Vec<u8> = (0..=255u8).cycle().take(200_000).collect();
    fs::write(dir.path().join("big.bin"), &content)?;
    fs::write(dir.path().join("empty.txt"), "")?;

    let mut catalog = empty_catalog();
    catalog.files = vec![
        FileSpec::new("big", "system/big.bin", &dir.path().join("big.bin").to_string_lossy()),
        FileSpec::new("empty", "system/empty.txt", &dir.path().join("empty.txt").to_string_lossy()),
        FileSpec::new("gone", "system/gone.txt", &dir.path().join("gone.txt").to_string_lossy()),
    ];

    let cfg = system_only_config();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let result = collect_all(&cfg, &catalog, &mut zip);
    let entries = read_entries(zip.finish()?.into_inner());

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "system/big.bin");
    assert_eq!(entries[0].1, content);

    assert_eq!(result.reports[0].bytes_written, 200_000);
    assert_eq!(result.reports[1].outcome, Outcome::Empty);
    assert!(matches!(result.reports[2].outcome, Outcome::Skipped(_)));
    Ok(())
}

#[test]
fn test_summary_is_the_last_entry() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("hosts"), "127.0.0.1 localhost\n")?;

    let mut catalog = empty_catalog();
    catalog.files = vec![FileSpec::new(
        "hosts",
        "system/hosts",
        &dir.path().join("hosts").to_string_lossy(),
    )];

    let cfg = system_only_config();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let result = collect_all(&cfg, &catalog, &mut zip);

    let json = create_collection_summary("db-01", "2026-03-14T15:09:26+00:00", &result)?;
    write_summary_entry(&mut zip, &json)?;
    let entries = read_entries(zip.finish()?.into_inner());

    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["system/hosts", "collection_summary.json"]);

    let summary: Value = serde_json::from_slice(&entries[1].1)?;
    assert_eq!(summary["hostname"], "db-01");
    assert_eq!(summary["collected_count"], 1);
    assert_eq!(summary["tasks"][0]["path"], "system/hosts");
    Ok(())
}

#[test]
fn test_postgres_phase_without_connection() {
    let args = Args::parse_from(["radar", "--skip-system", "-d", "app"]);
    let cfg = RunConfig::from_args(&args).unwrap();

    let mut catalog = empty_catalog();
    catalog.queries = vec![QuerySpec::new("version", "postgresql/version.tsv", "SELECT version()")];
    catalog.database_queries = vec![QuerySpec::new(
        "tables",
        "databases/{database}/tables.tsv",
        "SELECT 1",
    )];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let result = collect_all(&cfg, &catalog, &mut zip);
    let entries = read_entries(zip.finish().unwrap().into_inner());

    assert!(entries.is_empty());
    assert_eq!(result.reports.len(), 1);
    assert_eq!(result.collected(), 0);
    match &result.reports[0].outcome {
        Outcome::Failed(reason) => assert!(reason.contains("PostgreSQL not initialized")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_skipped_phases_collect_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("f"), "x").unwrap();

    let mut catalog = empty_catalog();
    catalog.files = vec![FileSpec::new("f", "system/f", &dir.path().join("f").to_string_lossy())];
    catalog.queries = vec![QuerySpec::new("version", "postgresql/version.tsv", "SELECT version()")];

    let args = Args::parse_from(["radar", "--skip-system", "-d", "app"]);
    let mut cfg = RunConfig::from_args(&args).unwrap();
    cfg.skip_postgres = true;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let result = collect_all(&cfg, &catalog, &mut zip);

    assert!(result.reports.is_empty());
    assert!(read_entries(zip.finish().unwrap().into_inner()).is_empty());
}
