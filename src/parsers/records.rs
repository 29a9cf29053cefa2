use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::SHADOW_NO_HASH;
use crate::models::{ParsedRecord, RecordBody};

/// How the lines of a collected file are turned into records
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// passwd-style, seven colon-separated fields
    AccountDatabase,
    /// shadow-style, only the presence of a password hash is kept
    ShadowDatabase,
    GroupDatabase,
    SudoersRule,
    FreeTextLine,
}

impl RecordKind {
    /// Choose the extraction strategy for a file.
    ///
    /// `matched_keyword` is the category keyword that routed the file; the
    /// structured kinds are keyed on it. Anything else falls back to line
    /// extraction when the lower-cased original name contains one of the
    /// free-text triggers.
    pub fn classify<S: AsRef<str>>(
        matched_keyword: Option<&str>,
        original_name: &str,
        free_text_triggers: &[S],
    ) -> Option<RecordKind> {
        let structured = matched_keyword.and_then(|keyword| {
            if keyword.starts_with("passwd") {
                Some(RecordKind::AccountDatabase)
            } else if keyword.starts_with("shadow") {
                Some(RecordKind::ShadowDatabase)
            } else if keyword.starts_with("group") {
                Some(RecordKind::GroupDatabase)
            } else if keyword.starts_with("sudoers") {
                Some(RecordKind::SudoersRule)
            } else {
                None
            }
        });
        if structured.is_some() {
            return structured;
        }

        let lower = original_name.to_lowercase();
        free_text_triggers
            .iter()
            .any(|trigger| lower.contains(trigger.as_ref()))
            .then_some(RecordKind::FreeTextLine)
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self, RecordKind::FreeTextLine)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::AccountDatabase => write!(f, "account"),
            RecordKind::ShadowDatabase => write!(f, "shadow"),
            RecordKind::GroupDatabase => write!(f, "group"),
            RecordKind::SudoersRule => write!(f, "sudoers"),
            RecordKind::FreeTextLine => write!(f, "free-text"),
        }
    }
}

/// Parse one colon-delimited database line.
///
/// Returns `None` when the line has fewer fields than its kind needs. The
/// line is expected trimmed and non-empty.
pub fn parse_delimited_line(kind: RecordKind, line: &str, hostname: &str) -> Option<ParsedRecord> {
    let parts: Vec<&str> = line.split(':').collect();

    let body = match kind {
        RecordKind::AccountDatabase if parts.len() >= 7 => RecordBody::Account {
            user: parts[0].to_string(),
            uid: parts[2].to_string(),
            gid: parts[3].to_string(),
            desc: parts[4].to_string(),
            home: parts[5].to_string(),
            shell: parts[6].to_string(),
        },
        RecordKind::ShadowDatabase if parts.len() >= 2 => RecordBody::Shadow {
            user: parts[0].to_string(),
            has_hash: !SHADOW_NO_HASH.contains(&parts[1]),
        },
        RecordKind::GroupDatabase if parts.len() >= 3 => RecordBody::Group {
            group: parts[0].to_string(),
            gid: parts[2].to_string(),
            members: parts
                .get(3)
                .map(|members| members.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        },
        RecordKind::SudoersRule => RecordBody::Sudoers {
            rule: line.to_string(),
        },
        _ => return None,
    };

    Some(ParsedRecord::new(hostname, body))
}

/// Build the record for one free-text line
pub fn parse_free_text_line(line: &str, hostname: &str, source_file: &str) -> ParsedRecord {
    ParsedRecord::new(
        hostname,
        RecordBody::Line {
            source_file: source_file.to_string(),
            line: line.to_string(),
        },
    )
}

/// Turn the content of a file into records, in line order.
///
/// Blank lines are skipped, the rest are trimmed. Structured lines below
/// their field minimum are dropped one by one.
pub fn parse_content(
    kind: RecordKind,
    content: &str,
    hostname: &str,
    source_file: &str,
) -> Vec<ParsedRecord> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match kind {
            RecordKind::FreeTextLine => Some(parse_free_text_line(line, hostname, source_file)),
            _ => parse_delimited_line(kind, line, hostname),
        })
        .collect()
}
