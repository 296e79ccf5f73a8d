use std::fmt;

use serde::{Deserialize, Serialize};

/// How a single collection task ended
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The producer succeeded and wrote at least one byte
    Produced,
    /// The producer succeeded without writing anything
    Empty,
    /// The data is legitimately unavailable on this host
    Skipped(String),
    /// The producer hit a real error
    Failed(String),
}

impl Outcome {
    pub fn is_produced(&self) -> bool {
        matches!(self, Outcome::Produced)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Produced => write!(f, "produced"),
            Outcome::Empty => write!(f, "empty"),
            Outcome::Skipped(reason) => write!(f, "skipped: {}", reason),
            Outcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Per-task record kept for the run summary
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub name: String,
    pub category: String,
    pub archive_path: String,
    pub outcome: Outcome,
    /// Whether an archive entry exists for this task, even a partial one
    pub archived: bool,
    pub bytes_written: u64,
    pub sha256: Option<String>,
}

/// Reports of one runner invocation
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PhaseResult {
    pub reports: Vec<TaskReport>,
}

impl PhaseResult {
    /// Number of tasks that produced output
    pub fn collected(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_produced()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed(_)))
            .count()
    }

    /// Append the reports of a later phase
    pub fn merge(&mut self, other: PhaseResult) {
        self.reports.extend(other.reports);
    }
}
