//! Integration tests for full end-to-end triage scenarios.
//!
//! These tests cover configuration loading, every record kind, the JSON
//! reports written at the output root and the text threshold.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use anyhow::Result;
use serde_json::Value;

use uac_triage::collectors::collector::{run_collection, run_parse, run_triage, OutputLayout};
use uac_triage::config::{load_or_default, CategoryId, TriageConfig};
use uac_triage::constants::{ALL_PARSED_NAME, COLLECTION_SUMMARY_NAME, PARSE_SUMMARY_NAME};
use uac_triage::models::RecordBody;

fn write(root: &Path, rel: &str, content: &[u8]) -> Result<()> {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(path, content)?;
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Builds one host with a file of every record kind
fn build_full_host(input: &Path) -> Result<()> {
    let host = input.join("srv01-20240115143052");
    write(&host, "root/etc/passwd", b"root:x:0:0:root:/root:/bin/bash\nbroken:x:1\n")?;
    write(&host, "root/etc/shadow", b"root:$6$abc$def:19000:0:99999:7:::\nbob:*:18000:0:99999:7:::\nsvc:!:18000::::::\n")?;
    write(&host, "root/etc/group", b"admins:x:1000:alice,bob\nempty:x:2000\n")?;
    write(&host, "root/etc/sudoers", b"root ALL=(ALL:ALL) ALL\n\n%admin ALL=(ALL) ALL\n")?;
    write(&host, "root/var/log/auth.log", b"line one\n\nline two\nline three\n")?;
    write(&host, "root/.ssh/authorized_keys", b"ssh-ed25519 AAAA user@host\n")?;
    write(&host, "root/var/log/wtmp.login", &[0u8, 1, 2, 3, 0, 0, 0, 0])?;
    write(&host, "root/notes.md", b"nothing to see\n")?;
    write(&host, "hash_executables/hash_executables.sha1", b"da39a3ee5e6b4b0d3255bfef95601890afd80709  /bin/sh\n")?;
    Ok(())
}

#[test]
fn test_every_record_kind() -> Result<()> {
    let input = TempDir::new()?;
    build_full_host(input.path())?;
    let output = TempDir::new()?;
    let layout = OutputLayout::new(output.path().join("run"));

    let report = run_triage(&TriageConfig::default(), input.path(), &layout, true)?;
    let parse = report.parse.expect("parsing ran");

    assert!(parse.records.iter().all(|r| r.hostname == "srv01"));

    let accounts: Vec<_> = parse.records.iter().filter(|r| matches!(r.body, RecordBody::Account { .. })).collect();
    assert_eq!(accounts.len(), 1, "short passwd line is dropped");

    let shadows: Vec<bool> = parse
        .records
        .iter()
        .filter_map(|r| match &r.body {
            RecordBody::Shadow { has_hash, .. } => Some(*has_hash),
            _ => None,
        })
        .collect();
    assert_eq!(shadows, vec![true, false, false]);

    let groups: Vec<_> = parse
        .records
        .iter()
        .filter_map(|r| match &r.body {
            RecordBody::Group { group, members, .. } => Some((group.clone(), members.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        groups,
        vec![
            ("admins".to_string(), vec!["alice".to_string(), "bob".to_string()]),
            ("empty".to_string(), vec![]),
        ]
    );

    let rules = parse.records.iter().filter(|r| matches!(r.body, RecordBody::Sudoers { .. })).count();
    assert_eq!(rules, 2);

    let auth_lines: Vec<_> = parse
        .records
        .iter()
        .filter_map(|r| match &r.body {
            RecordBody::Line { source_file, line } if source_file.ends_with("auth.log") => Some(line.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(auth_lines, vec!["line one", "line two", "line three"]);

    // notes.md is never collected, wtmp.login is collected but binary
    assert!(report.collected.iter().all(|f| !f.original_path.ends_with("notes.md")));
    assert!(report.collected.iter().any(|f| f.original_path.ends_with("wtmp.login")));
    assert!(!layout
        .parsed_dir(CategoryId::AuthAndUsers)
        .join("srv01-20240115143052__auth_and_users__root__wtmp_login.json")
        .exists());

    Ok(())
}

#[test]
fn test_reports_at_output_root() -> Result<()> {
    let input = TempDir::new()?;
    build_full_host(input.path())?;
    let output = TempDir::new()?;
    let layout = OutputLayout::new(output.path().join("run"));

    let report = run_triage(&TriageConfig::default(), input.path(), &layout, true)?;

    let manifest = read_json(&layout.root().join(COLLECTION_SUMMARY_NAME))?;
    assert_eq!(manifest["artifact_count"], report.collected.len());
    assert_eq!(manifest["categories"]["hashes"], 1);
    assert_eq!(manifest["categories"]["ssh_config"], 1);
    let first = &manifest["artifacts"][0];
    assert_eq!(first["sha256"].as_str().unwrap().len(), 64);
    assert!(!first["path"].as_str().unwrap().starts_with('/'));

    let summary = read_json(&layout.root().join(PARSE_SUMMARY_NAME))?;
    let merged = read_json(&layout.root().join(ALL_PARSED_NAME))?;
    assert_eq!(summary["total_records"], merged.as_array().unwrap().len());
    assert_eq!(summary["hosts"]["srv01"]["parsed_records"], merged.as_array().unwrap().len());
    assert_eq!(merged[0]["hostname"], "srv01");

    Ok(())
}

#[test]
fn test_parse_phase_can_run_later() -> Result<()> {
    let input = TempDir::new()?;
    build_full_host(input.path())?;
    let output = TempDir::new()?;
    let layout = OutputLayout::new(output.path().join("run"));
    let config = TriageConfig::default();

    let collected = run_collection(&config, input.path(), &layout)?;
    assert!(!collected.is_empty());
    assert!(!layout.root().join(ALL_PARSED_NAME).exists());

    let outcome = run_parse(&config, &layout, &collected)?;
    assert!(outcome.stats.parsed_files > 0);
    assert!(layout.root().join(ALL_PARSED_NAME).is_file());
    Ok(())
}

#[test]
fn test_custom_config_from_yaml() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("triage.yaml");
    let mut config = TriageConfig::default();
    config.options.skip_folders.push("root".to_string());
    config.save_to_yaml_file(&config_path)?;

    let loaded = load_or_default(Some(config_path.as_path()))?;
    assert_eq!(loaded, config);

    let input = TempDir::new()?;
    build_full_host(input.path())?;
    write(&input.path().join("srv01-20240115143052"), "alice/etc/passwd", b"alice:x:1001:1001::/home/alice:/bin/sh\n")?;
    let output = TempDir::new()?;
    let layout = OutputLayout::new(output.path().join("run"));

    let report = run_triage(&loaded, input.path(), &layout, false)?;
    let users: Vec<_> = report.collected.iter().filter_map(|f| f.username.as_deref()).collect();
    assert_eq!(users, vec!["alice"]);
    assert_eq!(report.count_in(CategoryId::Hashes), 1);
    Ok(())
}

#[test]
fn test_threshold_controls_parsing() -> Result<()> {
    let input = TempDir::new()?;
    // 8 printable bytes out of 10
    write(&input.path().join("h1"), "u/syslog", b"abcdefg\n\x00\x01")?;
    let config = TriageConfig::default();

    let strict = TempDir::new()?;
    let report = run_triage(&config, input.path(), &OutputLayout::new(strict.path()), true)?;
    assert_eq!(report.parse.unwrap().stats.parsed_files, 0);

    let mut lenient = config.clone();
    lenient.options.text_threshold = 0.5;
    let relaxed = TempDir::new()?;
    let report = run_triage(&lenient, input.path(), &OutputLayout::new(relaxed.path()), true)?;
    assert_eq!(report.parse.unwrap().stats.parsed_files, 1);
    Ok(())
}
