use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use uuid::Uuid;

use crate::config::CategoryId;
use crate::models::{CollectedFile, RunSummary};

/// Create a JSON manifest of the collection phase.
///
/// Lists every copied original with its origin, destination (relative to
/// the output root), size and SHA-256, so the output tree can be checked
/// against the evidence later.
///
/// # Example Output
///
/// ```json
/// {
///   "collection_id": "550e8400-e29b-41d4-a716-446655440000",
///   "examiner_host": "forensics-ws",
///   "collection_time": "20240115_1430",
///   "input_root": "/cases/uac",
///   "artifact_count": 42,
///   "categories": {"auth_and_users": 12, ...},
///   "artifacts": [...]
/// }
/// ```
pub fn create_collection_summary(
    examiner_host: &str,
    timestamp: &str,
    input_root: &Path,
    output_root: &Path,
    files: &[CollectedFile],
) -> Result<String> {
    let mut per_category: BTreeMap<&str, usize> = CategoryId::ALL
        .iter()
        .map(|id| (id.as_str(), 0))
        .collect();

    let artifact_list: Vec<_> = files
        .iter()
        .map(|file| {
            *per_category.entry(file.category.as_str()).or_default() += 1;
            let relative = file
                .destination_path
                .strip_prefix(output_root)
                .unwrap_or(&file.destination_path);
            json!({
                "host_id": file.host_id,
                "username": file.username,
                "original_path": file.original_path.to_string_lossy(),
                "category": file.category,
                "matched_keyword": file.matched_keyword,
                "path": relative.to_string_lossy().replace('\\', "/"),
                "file_size": file.file_size,
                "sha256": file.sha256,
                "modified_time": file.modified_time,
            })
        })
        .collect();

    let summary = json!({
        "collection_id": Uuid::new_v4().to_string(),
        "examiner_host": examiner_host,
        "collection_time": timestamp,
        "collector_version": env!("CARGO_PKG_VERSION"),
        "input_root": input_root.to_string_lossy(),
        "artifact_count": files.len(),
        "categories": per_category,
        "artifacts": artifact_list,
    });

    serde_json::to_string_pretty(&summary).context("Failed to serialize collection summary to JSON")
}

/// Create the JSON summary of the parse phase: per-host counters and totals
pub fn create_parse_summary(summary: &RunSummary, total_records: usize, skipped_files: usize) -> Result<String> {
    let parsed_files: u64 = summary.values().map(|c| c.parsed_files).sum();

    let report = json!({
        "host_count": summary.len(),
        "parsed_files": parsed_files,
        "skipped_files": skipped_files,
        "total_records": total_records,
        "hosts": summary,
    });

    serde_json::to_string_pretty(&report).context("Failed to serialize parse summary to JSON")
}
