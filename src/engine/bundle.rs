//! Publish input and result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One authored file: slash-separated relative name plus text content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
    pub name: String,
    pub content: String,
}

#[cfg(test)]
impl FileEntry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Ordered set of files to publish, as sent by the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishBundle {
    pub files: Vec<FileEntry>,

    /// Free-form label used in the cache tag and echoed back.
    #[serde(rename = "version", deserialize_with = "label_from_any")]
    pub version_label: Option<String>,

    /// Builder project the bundle came from. Only used for display.
    #[serde(rename = "projectId", deserialize_with = "label_from_any")]
    pub project_id: Option<String>,
}

impl PublishBundle {
    #[cfg(test)]
    pub fn new(files: Vec<FileEntry>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn with_version(mut self, label: impl Into<String>) -> Self {
        self.version_label = Some(label.into());
        self
    }
}

/// Builders send labels and ids as either strings or numbers.
fn label_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Serving state of the published site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    #[default]
    Stopped,
    Running,
}

impl ServerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Running => "Running",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful publish summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// Label as supplied by the caller.
    pub version: Option<String>,
    pub cache_tag: String,
    pub published_at: u64,
    pub files_written: usize,
    /// Entries skipped for having an empty name.
    pub skipped: usize,
    /// Status set by this publish, read under the engine lock.
    pub status: ServerStatus,
}

/// Successful unpublish summary.
#[derive(Debug, Default)]
pub struct UnpublishResult {
    pub removed: usize,
    /// Children that could not be removed.
    pub warnings: Vec<super::error::DeletionFailure>,
}
