//! # uac-triage
//!
//! Triage of Unix-like Artifacts Collector (UAC) output gathered from many
//! hosts at once.
//!
//! ## Overview
//!
//! Given a root directory with one folder per host, uac-triage copies the
//! forensically interesting files of every host into a single categorized
//! output tree, then optionally parses the text ones into JSON records
//! tagged with the host they came from.
//!
//! ## Features
//!
//! - **Keyword categories**: ordered, first-match classification of file names
//! - **Evidence safe copies**: never overwrites, keeps times and permissions, records SHA-256
//! - **Structured records**: account, shadow, group and sudoers databases
//! - **Free-text logs**: one record per non-empty line
//! - **YAML configuration**: categories and options can be overridden
//!
//! ## Usage
//!
//! ```no_run
//! use uac_triage::collectors::collector::{run_triage, OutputLayout};
//! use uac_triage::config::load_or_default;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = load_or_default(None)?;
//! let layout = OutputLayout::new("/tmp/triage");
//!
//! let report = run_triage(&config, Path::new("/cases/uac"), &layout, true)?;
//! if let Some(parse) = &report.parse {
//!     println!("{} records", parse.records.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Collected file and parsed record structures
//! - [`error`]: Error types of collection, parsing and configuration
//! - [`collectors`]: Host walking, placement and the two-phase orchestrator
//! - [`config`]: Category table and YAML configuration
//! - [`parsers`]: Text detection, host names and record extraction
//! - [`utils`]: Hashing and JSON reports
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models and structures used throughout the application
pub mod models;

/// Error types
pub mod error;

/// Collection of artifacts from UAC host folders
pub mod collectors;

/// Utility functions for hashing and reports
pub mod utils;

/// Configuration management and category definitions
pub mod config;

/// Record extraction from collected files
pub mod parsers;

/// Application constants and configuration values
pub mod constants;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;
