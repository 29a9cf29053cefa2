//! Collection of triage artifacts from a multi-host UAC tree.
//!
//! A run has two phases over one output tree:
//!
//! ```text
//! <input root>/
//!   web01-20230401120000/          host folder
//!     hash_executables/*     ──►   hashes/original/<host>__<file>
//!     root/**/passwd         ──►   auth_and_users/original/<host>__auth_and_users__root__passwd
//!     bodyfile/, live_response/    never walked
//!
//! <category>/original/*      ──►   <category>/parsed/<name_with_dots_as_underscores>.json
//! ```
//!
//! Collection finishes for every host before parsing starts. A failed copy
//! aborts the run; a file that cannot be parsed is skipped.
//!
//! ## Usage Example
//!
//! ```no_run
//! use uac_triage::collectors::collector::{run_triage, OutputLayout};
//! use uac_triage::config::TriageConfig;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = TriageConfig::default();
//! let layout = OutputLayout::timestamped(Path::new("/cases"), chrono::Local::now());
//!
//! let report = run_triage(&config, Path::new("/cases/uac"), &layout, true)?;
//! println!("Collected {} files", report.collected.len());
//! # Ok(())
//! # }
//! ```

/// Two-phase orchestrator and output layout
pub mod collector;

/// Collision-safe placement of originals
pub mod placement;

/// Host, user and file discovery
pub mod walker;
