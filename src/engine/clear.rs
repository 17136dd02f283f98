//! Emptying the published root in place.
//!
//! The root directory itself is never removed: it may be a bind mount, and
//! replacing its inode would detach it from the serving side.

use super::error::{DeletionFailure, PublishError, Step};
use std::fs;
use std::path::Path;

/// Outcome of clearing a directory's children.
#[derive(Debug, Default)]
pub struct ClearReport {
    pub removed: usize,
    pub failures: Vec<DeletionFailure>,
}

/// Remove every child of `root`, creating `root` if it is missing.
///
/// Files and symlinks are unlinked, subdirectories removed recursively.
/// A child that fails to go away is recorded and the rest are still tried.
/// Only failing to list `root` at all is an error.
pub fn clear_contents(root: &Path) -> Result<ClearReport, PublishError> {
    if !root.exists() {
        fs::create_dir_all(root).map_err(|e| PublishError::io(Step::CreateDir, root, e))?;
        return Ok(ClearReport::default());
    }

    let entries = fs::read_dir(root).map_err(|e| PublishError::io(Step::Clear, root, e))?;
    let mut report = ClearReport::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                report.failures.push(DeletionFailure {
                    path: root.to_path_buf(),
                    error,
                });
                continue;
            }
        };

        let path = entry.path();
        // file_type() does not follow symlinks, so a link to a directory is unlinked
        let result = match entry.file_type() {
            Ok(ft) if ft.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => report.removed += 1,
            Err(error) => report.failures.push(DeletionFailure { path, error }),
        }
    }

    Ok(report)
}
