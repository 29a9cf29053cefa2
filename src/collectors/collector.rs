use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, Utc};
use log::{debug, info, warn};

use crate::collectors::placement::{hash_placed_name, place_file, placed_name};
use crate::collectors::walker::{direct_files, host_dirs, user_dirs, walk_files};
use crate::config::{CategoryId, TriageConfig};
use crate::constants::{
    ALL_PARSED_NAME, COLLECTION_SUMMARY_NAME, ERROR_FAILED_TO_COPY, ERROR_FAILED_TO_WRITE_FILE,
    ERROR_INVALID_INPUT, NAME_SEPARATOR, ORIGINAL_DIR, OUTPUT_DIR_PREFIX, OUTPUT_TIMESTAMP_FORMAT,
    PARSED_DIR, PARSE_SUMMARY_NAME,
};
use crate::error::CollectError;
use crate::models::{CollectedFile, ParsedRecord, RunSummary};
use crate::parsers::{
    extract_hostname, extract_to_json, is_text_file, parsed_file_name, RecordKind, RunContext,
};
use crate::utils::hash::calculate_sha256;
use crate::utils::summary::{create_collection_summary, create_parse_summary};

/// Layout of one run's output tree
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputLayout { root: root.into() }
    }

    /// `<base>/_collected_important_logs_<YYYYMMDD_HHMM>`
    pub fn timestamped(base: &Path, now: DateTime<Local>) -> Self {
        let name = format!("{}{}", OUTPUT_DIR_PREFIX, now.format(OUTPUT_TIMESTAMP_FORMAT));
        Self::new(base.join(name))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn original_dir(&self, category: CategoryId) -> PathBuf {
        self.root.join(category.as_str()).join(ORIGINAL_DIR)
    }

    pub fn parsed_dir(&self, category: CategoryId) -> PathBuf {
        self.root.join(category.as_str()).join(PARSED_DIR)
    }

    /// Create `original/` and `parsed/` for every category
    pub fn create_dirs(&self, categories: impl IntoIterator<Item = CategoryId>) -> Result<()> {
        for category in categories {
            for dir in [self.original_dir(category), self.parsed_dir(category)] {
                fs::create_dir_all(&dir)
                    .context(format!("Failed to create output directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }
}

/// Host and original file name recovered from a placed name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedName<'a> {
    pub host_id: &'a str,
    pub original_name: &'a str,
}

impl<'a> PlacedName<'a> {
    /// Split `<host>__<category>__<user>__<file>` (or `<host>__<file>` for
    /// hash listings). Names not following the scheme are taken whole.
    ///
    /// The host ends at the first `__<category>__`. A user or file name that
    /// itself contains `__` cannot be told apart from the name alone; the
    /// user is taken to end at the first separator after the category.
    pub fn parse(category: CategoryId, name: &'a str) -> Self {
        let whole = PlacedName { host_id: name, original_name: name };

        if category == CategoryId::Hashes {
            return match name.split_once(NAME_SEPARATOR) {
                Some((host, file)) if !host.is_empty() && !file.is_empty() => {
                    PlacedName { host_id: host, original_name: file }
                }
                _ => whole,
            };
        }

        let infix = format!("{0}{1}{0}", NAME_SEPARATOR, category.as_str());
        let Some(at) = name.find(&infix) else {
            return whole;
        };
        let host = &name[..at];
        match name[at + infix.len()..].split_once(NAME_SEPARATOR) {
            Some((_user, file)) if !host.is_empty() && !file.is_empty() => {
                PlacedName { host_id: host, original_name: file }
            }
            _ => whole,
        }
    }

    /// Host and original name as recorded when the file was collected
    pub fn from_collected(file: &'a CollectedFile) -> Option<Self> {
        let original_name = file.original_path.file_name()?.to_str()?;
        Some(PlacedName { host_id: &file.host_id, original_name })
    }
}

/// Counters of the parse phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Files that produced at least one record
    pub parsed_files: usize,
    /// Text files of a parseable kind that produced nothing
    pub empty_files: usize,
    /// Binary files and files with no extraction strategy
    pub ignored_files: usize,
    /// Files that failed to read or write
    pub failed_files: usize,
}

/// Outcome of the parse phase
#[derive(Debug)]
pub struct ParseOutcome {
    pub stats: ParseStats,
    pub records: Vec<ParsedRecord>,
    pub summary: RunSummary,
}

/// Everything a run produced
#[derive(Debug)]
pub struct RunReport {
    pub output_root: PathBuf,
    pub collected: Vec<CollectedFile>,
    pub parse: Option<ParseOutcome>,
}

impl RunReport {
    pub fn count_in(&self, category: CategoryId) -> usize {
        self.collected.iter().filter(|f| f.category == category).count()
    }
}

/// Two-phase triage driver over a multi-host UAC input tree
pub struct Collector<'a> {
    config: &'a TriageConfig,
    layout: &'a OutputLayout,
}

impl<'a> Collector<'a> {
    pub fn new(config: &'a TriageConfig, layout: &'a OutputLayout) -> Self {
        Collector { config, layout }
    }

    /// Phase 1: copy hash listings and keyword-matched files of every host.
    ///
    /// A failed copy aborts the whole collection.
    pub fn collect_all(&self, input_root: &Path) -> Result<Vec<CollectedFile>> {
        let options = &self.config.options;
        let mut collected = Vec::new();

        for host in host_dirs(input_root, &options.excluded_host_prefix)? {
            debug!("Collecting host {}", host.name);

            let hash_dir = host.path.join(&options.hash_artifacts_dir);
            if hash_dir.is_dir() {
                for source in direct_files(&hash_dir)? {
                    collected.push(self.collect_hash_listing(&host.name, &source)?);
                }
            }

            for user in user_dirs(&host.path, options.skip_folders.as_slice())? {
                for source in walk_files(&user.path) {
                    if let Some(file) = self.collect_user_file(&host.name, &user.name, &source)? {
                        collected.push(file);
                    }
                }
            }
        }

        info!("Collected {} file(s) from {}", collected.len(), input_root.display());
        Ok(collected)
    }

    fn collect_hash_listing(&self, host_id: &str, source: &Path) -> Result<CollectedFile> {
        let file_name = file_name_of(source);
        let base_name = hash_placed_name(host_id, &file_name);
        self.place(host_id, None, source, CategoryId::Hashes, None, &base_name)
    }

    fn collect_user_file(
        &self,
        host_id: &str,
        username: &str,
        source: &Path,
    ) -> Result<Option<CollectedFile>> {
        let file_name = file_name_of(source);
        let Some(hit) = self.config.categories.classify(&file_name) else {
            return Ok(None);
        };

        let base_name = placed_name(host_id, hit.category, Some(username), &file_name);
        self.place(
            host_id,
            Some(username),
            source,
            hit.category,
            Some(hit.keyword),
            &base_name,
        )
        .map(Some)
    }

    fn place(
        &self,
        host_id: &str,
        username: Option<&str>,
        source: &Path,
        category: CategoryId,
        keyword: Option<&str>,
        base_name: &str,
    ) -> Result<CollectedFile> {
        let dest_dir = self.layout.original_dir(category);
        let placement = place_file(source, &dest_dir, base_name)
            .context(format!("{}: {}", ERROR_FAILED_TO_COPY, source.display()))?;

        let sha256 = calculate_sha256(&placement.path).map_err(|source| CollectError::Hash {
            path: placement.path.clone(),
            source,
        })?;

        let modified_time = fs::metadata(&placement.path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(|time| DateTime::<Utc>::from(time).to_rfc3339());

        info!("[{}] {} -> {}", category, source.display(), placement.path.display());

        Ok(CollectedFile {
            host_id: host_id.to_string(),
            username: username.map(str::to_string),
            original_path: source.to_path_buf(),
            category,
            matched_keyword: keyword.map(str::to_string),
            destination_path: placement.path,
            file_size: placement.file_size,
            sha256,
            modified_time,
        })
    }

    /// Phase 2: parse every text original of every category into JSON.
    ///
    /// `collected` is what phase 1 placed in this run; host and original
    /// name of those files come from it. Other files found in the tree are
    /// resolved from their placed name. Per-file failures are logged and
    /// skipped.
    pub fn parse_all(&self, ctx: &mut RunContext, collected: &[CollectedFile]) -> Result<ParseStats> {
        let mut stats = ParseStats::default();
        let known: HashMap<&Path, &CollectedFile> = collected
            .iter()
            .map(|file| (file.destination_path.as_path(), file))
            .collect();

        for category in self.config.categories.ids() {
            let original_dir = self.layout.original_dir(category);
            if !original_dir.is_dir() {
                continue;
            }
            let parsed_dir = self.layout.parsed_dir(category);

            for source in direct_files(&original_dir)? {
                let collected = known.get(source.as_path()).copied();
                self.parse_one(ctx, category, &source, collected, &parsed_dir, &mut stats);
            }
        }

        info!(
            "Parsed {} file(s): {} empty, {} ignored, {} failed",
            stats.parsed_files, stats.empty_files, stats.ignored_files, stats.failed_files
        );
        Ok(stats)
    }

    fn parse_one(
        &self,
        ctx: &mut RunContext,
        category: CategoryId,
        source: &Path,
        collected: Option<&CollectedFile>,
        parsed_dir: &Path,
        stats: &mut ParseStats,
    ) {
        let options = &self.config.options;

        if !is_text_file(source, options.text_threshold) {
            debug!("Skipping binary file {}", source.display());
            stats.ignored_files += 1;
            return;
        }

        let name = file_name_of(source);
        let placed = collected
            .and_then(PlacedName::from_collected)
            .unwrap_or_else(|| PlacedName::parse(category, &name));
        let keyword = self.config.categories.matched_keyword(category, placed.original_name);
        // category name included: every system_and_auth_logs file matches `log`
        let trigger_subject = [category.as_str(), placed.original_name].join(NAME_SEPARATOR);
        let Some(kind) = RecordKind::classify(
            keyword,
            &trigger_subject,
            options.free_text_triggers.as_slice(),
        ) else {
            debug!("No extraction strategy for {}", source.display());
            stats.ignored_files += 1;
            return;
        };

        let hostname = extract_hostname(placed.host_id);
        if hostname.is_empty() {
            warn!("Skipping {}: no host name could be derived", source.display());
            stats.failed_files += 1;
            return;
        }

        let output = parsed_dir.join(parsed_file_name(&name));
        match extract_to_json(ctx, source, &output, kind, hostname) {
            Ok(0) => stats.empty_files += 1,
            Ok(_) => stats.parsed_files += 1,
            Err(e) => {
                warn!("Skipping {}: {}", source.display(), e);
                stats.failed_files += 1;
            }
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Write pretty JSON to the output root
fn write_report(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).context(format!("{}: {}", ERROR_FAILED_TO_WRITE_FILE, path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}

/// Phase 1 with its setup: check the input root, create the output tree,
/// collect every host and write the collection manifest.
pub fn run_collection(
    config: &TriageConfig,
    input_root: &Path,
    layout: &OutputLayout,
) -> Result<Vec<CollectedFile>> {
    if !input_root.is_dir() {
        return Err(anyhow!("{}: {}", ERROR_INVALID_INPUT, input_root.display()));
    }

    layout.create_dirs(config.categories.ids())?;
    info!("Output directory: {}", layout.root().display());

    let collected = Collector::new(config, layout).collect_all(input_root)?;

    let examiner_host = hostname::get()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let timestamp = Local::now().format(OUTPUT_TIMESTAMP_FORMAT).to_string();
    let manifest = create_collection_summary(
        &examiner_host,
        &timestamp,
        input_root,
        layout.root(),
        &collected,
    )?;
    write_report(&layout.root().join(COLLECTION_SUMMARY_NAME), &manifest)?;

    Ok(collected)
}

/// Phase 2 over an existing output tree, writing the parse summary and
/// the merged record list. `collected` is the result of phase 1, empty
/// when parsing a tree from an earlier run.
pub fn run_parse(
    config: &TriageConfig,
    layout: &OutputLayout,
    collected: &[CollectedFile],
) -> Result<ParseOutcome> {
    let mut ctx = RunContext::new();
    let stats = Collector::new(config, layout).parse_all(&mut ctx, collected)?;
    let (records, summary) = ctx.into_parts();

    let skipped = stats.failed_files + stats.ignored_files;
    write_report(
        &layout.root().join(PARSE_SUMMARY_NAME),
        &create_parse_summary(&summary, records.len(), skipped)?,
    )?;
    let merged = serde_json::to_string_pretty(&records).context("Failed to serialize merged records")?;
    write_report(&layout.root().join(ALL_PARSED_NAME), &merged)?;

    Ok(ParseOutcome { stats, records, summary })
}

/// Run both phases; parsing only happens when `proceed` is set.
pub fn run_triage(
    config: &TriageConfig,
    input_root: &Path,
    layout: &OutputLayout,
    proceed: bool,
) -> Result<RunReport> {
    let collected = run_collection(config, input_root, layout)?;

    let parse = if proceed {
        Some(run_parse(config, layout, &collected)?)
    } else {
        info!("Parsing skipped");
        None
    };

    Ok(RunReport {
        output_root: layout.root().to_path_buf(),
        collected,
        parse,
    })
}
