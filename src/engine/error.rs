//! Publish engine error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Step of the publish sequence an I/O error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Clear,
    CreateDir,
    Write,
    Permissions,
}

impl Step {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::CreateDir => "create directory",
            Self::Write => "write",
            Self::Permissions => "set permissions",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by `Publisher` operations.
#[derive(Debug, Error)]
pub enum PublishError {
    /// File name is absolute or escapes the published root.
    #[error("invalid path `{name}`: {reason}")]
    InvalidPath { name: String, reason: &'static str },

    #[error("{step} failed for `{}`", .path.display())]
    Io {
        step: Step,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PublishError {
    pub(crate) fn io(step: Step, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            step,
            path: path.into(),
            source,
        }
    }

    /// Whether the caller sent a bad request, as opposed to a server-side failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}

/// A child of the published root that could not be removed.
///
/// Reported as a warning; clearing continues with the remaining children.
#[derive(Debug)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub error: std::io::Error,
}

impl fmt::Display for DeletionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to remove `{}`: {}", self.path.display(), self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_invalid_path_display() {
        let err = PublishError::InvalidPath {
            name: "../etc/passwd".to_string(),
            reason: "escapes the published root",
        };
        let display = err.to_string();
        assert!(display.contains("../etc/passwd"));
        assert!(display.contains("escapes"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_io_error_names_step_and_path() {
        let err = PublishError::io(
            Step::Write,
            "/srv/site/index.html",
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.starts_with("write failed"));
        assert!(display.contains("/srv/site/index.html"));
        assert!(!err.is_invalid_input());
    }
}
