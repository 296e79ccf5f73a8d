//! Global constants for the radar collector.
//!
//! Centralizes hardcoded values: exit codes, connection defaults, archive
//! settings and the phrase lists used to classify producer failures.

use zip::CompressionMethod;

// Archive settings
/// Compression method used for every archive entry
pub const DEFAULT_COMPRESSION_METHOD: CompressionMethod = CompressionMethod::Deflated;

/// Timestamp format used in the archive file name
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Prefix of the generated archive file name
pub const ARCHIVE_PREFIX: &str = "radar";

/// Name of the run summary entry added after collection
pub const SUMMARY_ENTRY_NAME: &str = "collection_summary.json";

/// Buffer size for streaming file reads into the archive (64KB)
pub const STREAMING_BUFFER_SIZE: usize = 64 * 1024;

// PostgreSQL defaults
/// Default PostgreSQL port
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Database used when none is given on the command line
pub const DEFAULT_DATABASE: &str = "postgres";

/// Host used when neither the flag nor PGHOST is set
pub const DEFAULT_HOST: &str = "localhost";

/// User used when no other source provides one
pub const DEFAULT_USER: &str = "postgres";

/// Databases never visited by per-database collection
pub const TEMPLATE_DATABASES: &[&str] = &["template0", "template1"];

/// Placeholder substituted with the database name in per-database archive paths
pub const DATABASE_PLACEHOLDER: &str = "{database}";

// Exit codes
pub const EXIT_USAGE_ERROR: i32 = 1;
pub const EXIT_COLLECT_ERROR: i32 = 3;
pub const EXIT_NO_DATA: i32 = 4;

// Failure classification
/// Exit status shells use for "command not found"
pub const COMMAND_NOT_FOUND_STATUS: i32 = 127;

/// Error text meaning the executable could not be located
pub const EXECUTABLE_NOT_FOUND_PATTERNS: &[&str] = &["executable file not found", "command not found"];

/// Output fragments meaning the requested data does not exist on this host
pub const NO_DATA_PATTERNS: &[&str] = &["No such file or directory", "no match", "doesn't exist"];

// Task categories
pub const CATEGORY_SYSTEM: &str = "system";
pub const CATEGORY_POSTGRESQL: &str = "postgresql";
pub const CATEGORY_DATABASE: &str = "database";
