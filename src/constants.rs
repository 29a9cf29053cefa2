//! Global constants for the uac-triage application.
//!
//! This module centralizes the hardcoded names, thresholds and layout
//! conventions shared by the collector, the parsers and the binary.

// Text detection
/// Number of leading bytes sampled by the text/binary heuristic
pub const TEXT_SAMPLE_SIZE: usize = 1024;

/// Default fraction of printable-ish bytes required to treat a file as text
pub const DEFAULT_TEXT_THRESHOLD: f64 = 0.90;

/// Control codes that still count as text (BEL, BS, TAB, LF, FF, CR, ESC)
pub const TEXT_CONTROL_CODES: &[u8] = &[7, 8, 9, 10, 12, 13, 27];

// UAC input layout
/// Directory inside each host folder holding hash listings of executables
pub const HASH_ARTIFACTS_DIR: &str = "hash_executables";

/// Host subdirectories that are never walked as user directories
pub const SKIP_FOLDERS: &[&str] = &["bodyfile", "hash_executables", "live_response"];

/// Host directories whose name starts with this marker are ignored
pub const EXCLUDED_HOST_PREFIX: &str = "_";

// Output layout
/// Prefix of the timestamped output directory
pub const OUTPUT_DIR_PREFIX: &str = "_collected_important_logs_";

/// chrono format of the output directory timestamp
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Per-category directory holding unmodified copies
pub const ORIGINAL_DIR: &str = "original";

/// Per-category directory holding JSON records
pub const PARSED_DIR: &str = "parsed";

/// Separator between the parts of a placed file name
pub const NAME_SEPARATOR: &str = "__";

/// Used in place of a user directory name when a file has no owner
pub const NO_USER: &str = "none";

// Record extraction
/// Substrings (lower-case) that mark a file for line-by-line extraction
pub const FREE_TEXT_TRIGGERS: &[&str] = &["log", "history", "authorized_keys", "hash"];

/// Shadow password fields that mean "no usable hash"
pub const SHADOW_NO_HASH: &[&str] = &["*", "!"];

// Report file names
pub const COLLECTION_SUMMARY_NAME: &str = "collection_summary.json";
pub const PARSE_SUMMARY_NAME: &str = "parse_summary.json";
pub const ALL_PARSED_NAME: &str = "all_parsed.json";

// Error messages
pub const ERROR_INVALID_INPUT: &str = "Invalid input folder";
pub const ERROR_FAILED_TO_COPY: &str = "Failed to copy artifact";
pub const ERROR_FAILED_TO_WRITE_FILE: &str = "Failed to write file";

/// Size of the read buffer used while hashing collected files (1MB)
pub const HASH_BUFFER_SIZE: usize = 1024 * 1024;
