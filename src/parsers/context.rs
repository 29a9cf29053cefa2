use crate::models::{HostCounters, ParsedRecord, RunSummary};

/// Run-scoped accumulator of parsed records and per-host counters.
///
/// Records keep discovery order and are never changed once absorbed.
#[derive(Debug, Default)]
pub struct RunContext {
    records: Vec<ParsedRecord>,
    summary: RunSummary,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one successfully parsed file.
    ///
    /// An empty batch is ignored so hosts only appear once they produced
    /// something.
    pub fn absorb(&mut self, hostname: &str, records: Vec<ParsedRecord>) {
        if records.is_empty() {
            return;
        }
        let counters = self.summary.entry(hostname.to_string()).or_default();
        counters.parsed_files += 1;
        counters.parsed_records += records.len() as u64;
        self.records.extend(records);
    }

    pub fn records(&self) -> &[ParsedRecord] {
        &self.records
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn counters(&self, hostname: &str) -> Option<HostCounters> {
        self.summary.get(hostname).copied()
    }

    pub fn parsed_files(&self) -> u64 {
        self.summary.values().map(|c| c.parsed_files).sum()
    }

    pub fn into_parts(self) -> (Vec<ParsedRecord>, RunSummary) {
        (self.records, self.summary)
    }
}
