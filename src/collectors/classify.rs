//! Rules separating "legitimately unavailable" from real failures.

use std::io;
use std::process::ExitStatus;

use crate::constants::{COMMAND_NOT_FOUND_STATUS, EXECUTABLE_NOT_FOUND_PATTERNS, NO_DATA_PATTERNS};

/// Whether spawning a command failed because the executable is missing
pub fn is_spawn_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound || is_not_found_message(&err.to_string())
}

/// Whether an error message says the executable could not be located
pub fn is_not_found_message(message: &str) -> bool {
    EXECUTABLE_NOT_FOUND_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}

/// Whether a finished command exited with the shell's "command not found" status
pub fn is_not_found_status(status: &ExitStatus) -> bool {
    status.code() == Some(COMMAND_NOT_FOUND_STATUS)
}

/// Whether the output of a failed command means there is simply nothing to collect.
///
/// Blank output counts as no data. Pattern matching is case-insensitive.
pub fn is_no_data_available(output: &str) -> bool {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return true;
    }

    let lower = trimmed.to_lowercase();
    NO_DATA_PATTERNS
        .iter()
        .any(|pattern| lower.contains(&pattern.to_lowercase()))
}

/// Known commands whose non-zero exit is a normal answer.
///
/// Returns the output to record instead of treating the exit as an error.
pub fn handle_special_cases(program: &str, output: &[u8]) -> Option<Vec<u8>> {
    // exits 1 when the host is not virtualized
    if program == "systemd-detect-virt" && String::from_utf8_lossy(output).trim() == "none" {
        return Some(b"none\n".to_vec());
    }

    None
}
