//! Structured record extraction.
//!
//! Turns collected originals into normalized JSON records:
//!
//! - **Text detection**: byte-sample heuristic deciding what is worth parsing
//! - **Hostname**: host name recovery from UAC folder names
//! - **Records**: record kinds and the per-line parsers for account, shadow,
//!   group, sudoers and free-text inputs
//! - **Extractor**: file-level read, parse and JSON write
//! - **Context**: run-scoped record list and per-host counters
//!
//! ## Usage Example
//!
//! ```no_run
//! use uac_triage::parsers::{extract_to_json, RecordKind, RunContext};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut ctx = RunContext::new();
//! extract_to_json(
//!     &mut ctx,
//!     Path::new("/tmp/out/auth_and_users/original/web01__auth_and_users__root__passwd"),
//!     Path::new("/tmp/out/auth_and_users/parsed/web01__auth_and_users__root__passwd.json"),
//!     RecordKind::AccountDatabase,
//!     "web01",
//! )?;
//! println!("{} records so far", ctx.records().len());
//! # Ok(())
//! # }
//! ```

/// Text/binary heuristic
pub mod text;

/// Host name extraction from UAC names
pub mod hostname;

/// Record kinds and line parsers
pub mod records;

/// File-level extraction and JSON output
pub mod extractor;

/// Run-scoped record accumulator
pub mod context;

pub use context::RunContext;
pub use extractor::{extract_records, extract_to_json, parsed_file_name, write_records};
pub use hostname::extract_hostname;
pub use records::RecordKind;
pub use text::is_text_file;
