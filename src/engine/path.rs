//! File name validation against the published root.

use super::error::PublishError;
use std::path::PathBuf;

/// Normalize a bundle name into a relative path. Both `/` and `\` separate
/// segments.
///
/// `.` and empty segments are dropped and `..` pops the previous segment.
/// Rejects absolute names, names that climb above the root, names that
/// collapse to the root itself and names containing NUL.
pub fn normalize_name(name: &str) -> Result<PathBuf, PublishError> {
    let invalid = |reason| PublishError::InvalidPath {
        name: name.to_string(),
        reason,
    };

    if name.contains('\0') {
        return Err(invalid("contains a NUL byte"));
    }
    if name.starts_with('/') || name.starts_with('\\') || has_drive_prefix(name) {
        return Err(invalid("absolute paths are not allowed"));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in name.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(invalid("escapes the published root"));
                }
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(invalid("does not name a file"));
    }

    Ok(segments.iter().collect())
}

/// `C:` style prefixes, absolute on Windows.
fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
