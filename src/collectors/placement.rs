use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::CategoryId;
use crate::constants::{NAME_SEPARATOR, NO_USER};
use crate::error::CollectError;

/// Base name of a keyword-classified original:
/// `<host>__<category>__<user>__<file>`
pub fn placed_name(host_id: &str, category: CategoryId, username: Option<&str>, file_name: &str) -> String {
    [host_id, category.as_str(), username.unwrap_or(NO_USER), file_name].join(NAME_SEPARATOR)
}

/// Base name of a hash listing: `<host>__<file>`
pub fn hash_placed_name(host_id: &str, file_name: &str) -> String {
    [host_id, file_name].join(NAME_SEPARATOR)
}

/// Candidate path for attempt `n`; attempt 0 is the base name itself and
/// later attempts insert `_<n>` before the extension.
pub fn candidate_path(dest_dir: &Path, base_name: &str, n: usize) -> PathBuf {
    let base_path = dest_dir.join(base_name);
    if n == 0 {
        return base_path;
    }

    let file_stem = base_path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| base_name.to_string());

    let extension = base_path.extension()
        .map(|s| format!(".{}", s.to_string_lossy()))
        .unwrap_or_default();

    dest_dir.join(format!("{}_{}{}", file_stem, n, extension))
}

/// Result of placing one file
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub path: PathBuf,
    pub file_size: u64,
}

fn validate_base_name(base_name: &str) -> Result<(), CollectError> {
    let invalid = base_name.is_empty()
        || base_name == "."
        || base_name == ".."
        || base_name.contains('/')
        || base_name.contains('\\')
        || base_name.contains('\0');
    if invalid {
        return Err(CollectError::InvalidName(base_name.to_string()));
    }
    Ok(())
}

/// Copy `source` into `dest_dir` under a name that did not exist before.
///
/// The destination is created exclusively, so an existing file is never
/// overwritten: a name that turns up taken moves on to the next suffix.
/// Permissions and access/modification times of the source are kept.
pub fn place_file(source: &Path, dest_dir: &Path, base_name: &str) -> Result<Placement, CollectError> {
    validate_base_name(base_name)?;

    let metadata = fs::metadata(source).map_err(|e| CollectError::Metadata {
        path: source.to_path_buf(),
        source: e,
    })?;

    fs::create_dir_all(dest_dir).map_err(|e| CollectError::CreateDirectory {
        path: dest_dir.to_path_buf(),
        source: e,
    })?;

    let mut reader = File::open(source).map_err(|e| CollectError::Copy {
        from: source.to_path_buf(),
        to: dest_dir.join(base_name),
        source: e,
    })?;

    let mut n = 0;
    let (dest, mut writer) = loop {
        let candidate = candidate_path(dest_dir, base_name, n);
        n += 1;
        if candidate.exists() {
            continue;
        }
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => break (candidate, file),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(CollectError::Copy {
                    from: source.to_path_buf(),
                    to: candidate,
                    source: e,
                })
            }
        }
    };

    debug!("Placing {} at {}", source.display(), dest.display());

    let copied = match io::copy(&mut reader, &mut writer) {
        Ok(copied) => copied,
        Err(e) => {
            drop(writer);
            // Only the file created above is removed, never a pre-existing one
            let _ = fs::remove_file(&dest);
            return Err(CollectError::Copy {
                from: source.to_path_buf(),
                to: dest,
                source: e,
            });
        }
    };

    preserve_metadata(&writer, &dest, &metadata)?;

    Ok(Placement {
        path: dest,
        file_size: copied,
    })
}

fn preserve_metadata(writer: &File, dest: &Path, metadata: &fs::Metadata) -> Result<(), CollectError> {
    let wrap = |e: io::Error| CollectError::PreserveMetadata {
        path: dest.to_path_buf(),
        source: e,
    };

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    writer.set_times(times).map_err(wrap)?;

    fs::set_permissions(dest, metadata.permissions()).map_err(wrap)
}
