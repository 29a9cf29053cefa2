use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::CategoryId;

/// One artifact copied into `<category>/original/` during collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CollectedFile {
    pub host_id: String,
    pub username: Option<String>,
    pub original_path: PathBuf,
    pub category: CategoryId,
    /// Keyword that routed the file, absent for hash listings
    pub matched_keyword: Option<String>,
    pub destination_path: PathBuf,
    pub file_size: u64,
    pub sha256: String,
    pub modified_time: Option<String>,
}

/// Format-specific fields of a parsed record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RecordBody {
    Account {
        user: String,
        uid: String,
        gid: String,
        desc: String,
        home: String,
        shell: String,
    },
    Shadow {
        user: String,
        has_hash: bool,
    },
    Group {
        group: String,
        gid: String,
        members: Vec<String>,
    },
    Sudoers {
        rule: String,
    },
    Line {
        source_file: String,
        line: String,
    },
}

/// A normalized record; serialized flat with `hostname` first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub hostname: String,
    #[serde(flatten)]
    pub body: RecordBody,
}

impl ParsedRecord {
    pub fn new(hostname: &str, body: RecordBody) -> Self {
        ParsedRecord {
            hostname: hostname.to_string(),
            body,
        }
    }
}

/// Counters kept for each host that produced records
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCounters {
    pub parsed_files: u64,
    pub parsed_records: u64,
}

/// Per-host counters for one run, keyed by host name
pub type RunSummary = BTreeMap<String, HostCounters>;
