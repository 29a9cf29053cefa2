//! Test utilities for uac-triage
//!
//! Temporary files and UAC-shaped fixture trees shared by the unit tests.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Creates a temporary directory that is automatically cleaned up
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a temporary file with the given content
pub fn create_temp_file(content: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    use std::io::Write;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

pub const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash\nalice:x:1001:1001:Alice:/home/alice:/bin/bash\n";
pub const SHADOW: &str = "root:$6$salt$hash:19000:0:99999:7:::\nbob:*:18000:0:99999:7:::\n";
pub const AUTH_LOG: &str = "Jan  1 00:00:01 sshd[1]: Accepted publickey\n\nJan  1 00:00:02 sshd[1]: session opened\n";

/// Writes `content` at `rel` below `root`, creating parents
pub fn write_fixture(root: &Path, rel: &str, content: &[u8]) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Creates a UAC input root with one folder per host.
///
/// Every host gets `root/etc/passwd`, `root/var/log/auth.log`,
/// `alice/etc/shadow`, a hash listing and a `live_response` folder that
/// must never be collected.
pub fn create_uac_tree(hosts: &[&str]) -> Result<TempDir> {
    let root = create_temp_dir()?;
    for host in hosts {
        let base = root.path().join(host);
        write_fixture(&base, "root/etc/passwd", PASSWD.as_bytes())?;
        write_fixture(&base, "root/var/log/auth.log", AUTH_LOG.as_bytes())?;
        write_fixture(&base, "alice/etc/shadow", SHADOW.as_bytes())?;
        write_fixture(&base, "hash_executables/hash_executables.md5", b"d41d8cd98f00b204e9800998ecf8427e  /bin/ls\n")?;
        write_fixture(&base, "live_response/process/ps.txt", b"PID TTY TIME CMD\n")?;
    }
    Ok(root)
}
