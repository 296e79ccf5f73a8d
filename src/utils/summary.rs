use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};
use serde_json::json;
use uuid::Uuid;
use zip::ZipWriter;

use crate::constants::SUMMARY_ENTRY_NAME;
use crate::models::{Outcome, PhaseResult};
use crate::utils::lazy_zip::entry_options;

/// Create a JSON summary of the run.
///
/// Lists every task with its outcome, the bytes it archived and their
/// SHA-256, next to run-level counts.
///
/// # Example Output
///
/// ```json
/// {
///   "collection_id": "550e8400-e29b-41d4-a716-446655440000",
///   "hostname": "db-01",
///   "collection_time": "2026-03-14T15:09:26+00:00",
///   "collected_count": 42,
///   "tasks": [...]
/// }
/// ```
pub fn create_collection_summary(hostname: &str, timestamp: &str, result: &PhaseResult) -> Result<String> {
    let tasks: Vec<_> = result
        .reports
        .iter()
        .map(|report| {
            let reason = match &report.outcome {
                Outcome::Skipped(reason) | Outcome::Failed(reason) => Some(reason.as_str()),
                _ => None,
            };
            json!({
                "name": report.name,
                "category": report.category,
                "path": report.archive_path,
                "outcome": outcome_label(&report.outcome),
                "reason": reason,
                "archived": report.archived,
                "bytes_written": report.bytes_written,
                "sha256": report.sha256,
            })
        })
        .collect();

    let summary = json!({
        "collection_id": Uuid::new_v4().to_string(),
        "hostname": hostname,
        "collection_time": timestamp,
        "os": std::env::consts::OS,
        "collector_version": env!("CARGO_PKG_VERSION"),
        "task_count": result.reports.len(),
        "collected_count": result.collected(),
        "skipped_count": result.skipped(),
        "failed_count": result.failed(),
        "tasks": tasks,
    });

    serde_json::to_string_pretty(&summary).context("Failed to serialize collection summary to JSON")
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Produced => "produced",
        Outcome::Empty => "empty",
        Outcome::Skipped(_) => "skipped",
        Outcome::Failed(_) => "failed",
    }
}

/// Add the summary as the last archive entry
pub fn write_summary_entry<W: Write + Seek>(zip: &mut ZipWriter<W>, summary: &str) -> Result<()> {
    zip.start_file(SUMMARY_ENTRY_NAME, entry_options())
        .context("Failed to add summary to archive")?;
    zip.write_all(summary.as_bytes())
        .context("Failed to write summary to archive")?;
    Ok(())
}

/// Human-readable result lines for the finished archive
pub fn summary_lines(archive: &Path, size_bytes: u64, collected: usize, verbose: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Archive created: {} ({} KB)",
        archive.display(),
        size_bytes / 1024
    )];
    if verbose {
        lines.push(format!("  Total collectors: {}", collected));
    }
    lines
}

/// Log the result lines for the archive on disk
pub fn print_summary(archive: &Path, collected: usize, verbose: bool) {
    let size = match fs::metadata(archive) {
        Ok(meta) => meta.len(),
        Err(e) => {
            error!("Failed to stat archive: {}", e);
            return;
        }
    };

    for line in summary_lines(archive, size, collected, verbose) {
        info!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskReport;
    use crate::test_utils::read_archive;
    use serde_json::Value;
    use std::io::Cursor;

    fn sample_result() -> PhaseResult {
        PhaseResult {
            reports: vec![
                TaskReport {
                    name: "uname".into(),
                    category: "system".into(),
                    archive_path: "system/uname.out".into(),
                    outcome: Outcome::Produced,
                    archived: true,
                    bytes_written: 64,
                    sha256: Some("ab".repeat(32)),
                },
                TaskReport {
                    name: "iostat".into(),
                    category: "system".into(),
                    archive_path: "system/iostat.out".into(),
                    outcome: Outcome::Skipped("command not found: iostat".into()),
                    archived: false,
                    bytes_written: 0,
                    sha256: None,
                },
            ],
        }
    }

    #[test]
    fn test_summary_fields() {
        let json_str =
            create_collection_summary("db-01", "2026-03-14T15:09:26+00:00", &sample_result()).unwrap();
        let json: Value = serde_json::from_str(&json_str).unwrap();

        assert_eq!(json["hostname"], "db-01");
        assert_eq!(json["collection_time"], "2026-03-14T15:09:26+00:00");
        assert!(json["collection_id"].is_string());
        assert!(json["collector_version"].is_string());
        assert_eq!(json["task_count"], 2);
        assert_eq!(json["collected_count"], 1);
        assert_eq!(json["skipped_count"], 1);
        assert_eq!(json["failed_count"], 0);

        let tasks = json["tasks"].as_array().unwrap();
        assert_eq!(tasks[0]["path"], "system/uname.out");
        assert_eq!(tasks[0]["outcome"], "produced");
        assert!(tasks[0]["reason"].is_null());
        assert_eq!(tasks[0]["bytes_written"], 64);
        assert_eq!(tasks[1]["outcome"], "skipped");
        assert_eq!(tasks[1]["reason"], "command not found: iostat");
        assert!(tasks[1]["sha256"].is_null());
    }

    #[test]
    fn test_unique_collection_ids() {
        let result = sample_result();
        let a: Value = serde_json::from_str(&create_collection_summary("h", "t", &result).unwrap()).unwrap();
        let b: Value = serde_json::from_str(&create_collection_summary("h", "t", &result).unwrap()).unwrap();
        assert_ne!(a["collection_id"], b["collection_id"]);
    }

    #[test]
    fn test_summary_entry_is_written() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        write_summary_entry(&mut zip, "{}").unwrap();
        let entries = read_archive(zip.finish().unwrap().into_inner());
        assert_eq!(entries, vec![("collection_summary.json".to_string(), b"{}".to_vec())]);
    }

    #[test]
    fn test_summary_lines() {
        let path = Path::new("radar-db-01-20260314-150926.zip");

        let lines = summary_lines(path, 10 * 1024 + 500, 42, false);
        assert_eq!(lines, vec!["Archive created: radar-db-01-20260314-150926.zip (10 KB)"]);

        let lines = summary_lines(path, 2048, 42, true);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "  Total collectors: 42");
    }
}
