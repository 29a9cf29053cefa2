use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::ParseError;
use crate::models::ParsedRecord;
use crate::parsers::context::RunContext;
use crate::parsers::records::{parse_content, RecordKind};

/// Name of the JSON file written for an original: every `.` becomes `_`
pub fn parsed_file_name(original_name: &str) -> String {
    format!("{}.json", original_name.replace('.', "_"))
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them
pub fn decode_ignoring_invalid(mut bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                decoded.push_str(valid);
                return decoded;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                decoded.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let invalid_len = e.error_len().unwrap_or(rest.len());
                bytes = &rest[invalid_len..];
            }
        }
    }
}

/// Read a collected file and turn it into records.
///
/// Invalid UTF-8 is dropped from the content, so only I/O problems fail
/// the file.
pub fn extract_records(
    path: &Path,
    kind: RecordKind,
    hostname: &str,
    source_file: &str,
) -> Result<Vec<ParsedRecord>, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = decode_ignoring_invalid(&bytes);

    let records = parse_content(kind, &content, hostname, source_file);
    debug!(
        "Extracted {} {} record(s) from {}",
        records.len(),
        kind,
        path.display()
    );
    Ok(records)
}

/// Write records as a pretty-printed JSON array
pub fn write_records(records: &[ParsedRecord], output: &Path) -> Result<(), ParseError> {
    let json = serde_json::to_string_pretty(records).map_err(|source| ParseError::Serialize {
        path: output.to_path_buf(),
        source,
    })?;

    fs::write(output, json).map_err(|source| ParseError::Write {
        path: output.to_path_buf(),
        source,
    })
}

/// Parse one original into `output`, then hand the records to the run.
///
/// Returns the number of records produced. Nothing is written and no
/// counter moves when the file yields no records.
pub fn extract_to_json(
    ctx: &mut RunContext,
    source: &Path,
    output: &Path,
    kind: RecordKind,
    hostname: &str,
) -> Result<usize, ParseError> {
    let source_file = source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let records = extract_records(source, kind, hostname, &source_file)?;
    if records.is_empty() {
        debug!("No records in {}, nothing written", source.display());
        return Ok(0);
    }

    write_records(&records, output)?;
    let count = records.len();
    ctx.absorb(hostname, records);

    info!("[parsed] {} -> {} ({} records)", source.display(), output.display(), count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_decode_drops_invalid_bytes() {
        assert_eq!(decode_ignoring_invalid(b"plain"), "plain");
        assert_eq!(decode_ignoring_invalid(b"ok\xffline"), "okline");
        assert_eq!(decode_ignoring_invalid(b"\xc3\xa9t\xe9"), "\u{e9}t");
        // truncated sequence at the end
        assert_eq!(decode_ignoring_invalid(b"abc\xe2\x82"), "abc");
        // a valid replacement character is kept
        assert_eq!(decode_ignoring_invalid("a\u{fffd}b".as_bytes()), "a\u{fffd}b");
    }

    #[test]
    fn test_invalid_utf8_never_reaches_records() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("web01__system_and_auth_logs__root__messages");
        fs::write(&source, b"kernel: \xfe\xffboot ok\n").unwrap();

        let records = extract_records(&source, RecordKind::FreeTextLine, "web01", "messages").unwrap();
        assert_eq!(records.len(), 1);
        match &records[0].body {
            crate::models::RecordBody::Line { line, .. } => assert_eq!(line, "kernel: boot ok"),
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_parsed_file_name() {
        assert_eq!(parsed_file_name("web01__auth_and_users__root__passwd"), "web01__auth_and_users__root__passwd.json");
        assert_eq!(parsed_file_name("h__system_and_auth_logs__u__auth.log.1"), "h__system_and_auth_logs__u__auth_log_1.json");
        assert_eq!(parsed_file_name("h__u__.bash_history"), "h__u___bash_history.json");
    }

    #[test]
    fn test_free_text_file_yields_one_record_per_line() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("web01__system_and_auth_logs__root__syslog");
        fs::write(&source, "boot\n\nsshd started\ncron ran\n").unwrap();
        let output = dir.path().join("out.json");

        let mut ctx = RunContext::new();
        let count =
            extract_to_json(&mut ctx, &source, &output, RecordKind::FreeTextLine, "web01").unwrap();

        assert_eq!(count, 3);
        let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 3);
        for record in records {
            assert_eq!(record["hostname"], "web01");
            assert_eq!(record["source_file"], "web01__system_and_auth_logs__root__syslog");
        }
        assert_eq!(records[1]["line"], "sshd started");
        assert_eq!(ctx.counters("web01").unwrap().parsed_files, 1);
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("passwd");
        fs::write(&source, "short:line\n\n").unwrap();
        let output = dir.path().join("passwd.json");

        let mut ctx = RunContext::new();
        let count =
            extract_to_json(&mut ctx, &source, &output, RecordKind::AccountDatabase, "h").unwrap();

        assert_eq!(count, 0);
        assert!(!output.exists());
        assert!(ctx.summary().is_empty());
    }

    #[test]
    fn test_missing_file_is_a_parse_error() {
        let result = extract_records(
            Path::new("/nonexistent/passwd"),
            RecordKind::AccountDatabase,
            "h",
            "passwd",
        );
        assert!(matches!(result, Err(ParseError::Read { .. })));
    }

    #[test]
    fn test_unwritable_output_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("passwd");
        fs::write(&source, "root:x:0:0:root:/root:/bin/bash\n").unwrap();
        let output = dir.path().join("missing_dir").join("passwd.json");

        let mut ctx = RunContext::new();
        let result = extract_to_json(&mut ctx, &source, &output, RecordKind::AccountDatabase, "h");
        assert!(matches!(result, Err(ParseError::Write { .. })));
        assert!(ctx.records().is_empty());
    }
}
