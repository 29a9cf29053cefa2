//! Utility functions for collected artifacts.
//!
//! ## Components
//!
//! - **Hashing**: SHA-256 of every copied original, recorded in the manifest
//! - **Summary**: collection manifest and parse summary reports
//!
//! ### Generating File Hashes
//!
//! ```no_run
//! use uac_triage::utils::hash::calculate_sha256;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let file_path = Path::new("/evidence/web01__auth_and_users__root__passwd");
//! println!("SHA-256: {}", calculate_sha256(file_path)?);
//! # Ok(())
//! # }
//! ```

/// Collection and parse summary reports
pub mod summary;

/// Cryptographic hash calculation utilities
pub mod hash;
