//! Publish engine: replaces the served directory with a bundle of files.
//!
//! # Sequence
//!
//! ```text
//! publish(bundle)
//!   ├── validate names          (nothing touched on failure)
//!   ├── clear root contents     (root inode kept)
//!   ├── cache tag = label-unix
//!   ├── write files             (entry document rewritten, mode applied)
//!   └── status = Running
//!
//! unpublish()
//!   ├── clear root contents     (best effort)
//!   └── status = Stopped
//! ```
//!
//! Writes go directly into the cleared root, there is no staging directory.
//! A write failure stops the remaining writes but keeps the files already
//! written; re-publishing is the recovery path. Readers of the root are not
//! coordinated with the engine and may see a partial tree mid-publish.

mod bundle;
mod clear;
mod error;
mod path;
mod version;

pub use bundle::{PublishBundle, ServerStatus};
pub use error::PublishError;
pub use path::normalize_name;
pub use version::unix_now;

use bundle::{PublishResult, UnpublishResult};
use clear::clear_contents;
use error::Step;
use version::{cache_tag, rewrite_asset_refs};

use crate::{debug, log};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// Default entry document name.
pub const DEFAULT_ENTRY: &str = "index.html";
/// Label used in the cache tag when the bundle carries none.
pub const DEFAULT_LABEL: &str = "latest";
/// Owner read/write, world readable.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Engine settings, derived from the `[publish]` config section.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Relative path of the document whose asset references get tagged.
    pub entry: PathBuf,
    pub default_label: String,
    pub file_mode: u32,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(DEFAULT_ENTRY),
            default_label: DEFAULT_LABEL.to_string(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

/// Owner of the published root and the serving status.
///
/// The lock is held across the entire clear/write sequence, so publish and
/// unpublish never interleave and status always matches the last completed
/// operation.
pub struct Publisher {
    root: PathBuf,
    options: PublishOptions,
    status: Mutex<ServerStatus>,
}

/// A bundle entry after validation.
struct PlannedFile<'a> {
    rel: PathBuf,
    content: &'a str,
}

impl Publisher {
    /// Create an engine for `root`. Status starts as `Stopped` regardless of
    /// what is already on disk.
    pub fn new(root: impl Into<PathBuf>, options: PublishOptions) -> Self {
        Self {
            root: root.into(),
            options,
            status: Mutex::new(ServerStatus::Stopped),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn status(&self) -> ServerStatus {
        *self.status.lock()
    }

    /// Publish `bundle`, tagging assets with the current unix time.
    pub fn publish(&self, bundle: &PublishBundle) -> Result<PublishResult, PublishError> {
        self.publish_at(bundle, unix_now())
    }

    /// Publish `bundle` with an explicit timestamp for the cache tag.
    pub fn publish_at(
        &self,
        bundle: &PublishBundle,
        timestamp: u64,
    ) -> Result<PublishResult, PublishError> {
        let (plan, skipped) = plan_files(bundle)?;

        let mut status = self.status.lock();

        let report = clear_contents(&self.root)?;
        if let Some(failure) = report.failures.into_iter().next() {
            // Leftovers from the previous bundle would survive the publish
            log!("publish"; "{}", failure);
            return Err(PublishError::io(Step::Clear, failure.path, failure.error));
        }
        debug!("publish"; "cleared {} entries from {}", report.removed, self.root.display());

        let label = bundle
            .version_label
            .as_deref()
            .unwrap_or(&self.options.default_label);
        let tag = cache_tag(label, timestamp);

        for file in &plan {
            self.write_file(file, &tag)?;
        }

        *status = ServerStatus::Running;

        Ok(PublishResult {
            version: bundle.version_label.clone(),
            cache_tag: tag,
            published_at: timestamp,
            files_written: plan.len(),
            skipped,
            status: *status,
        })
    }

    /// Empty the published root and mark the site stopped.
    ///
    /// Children that cannot be removed are returned as warnings; the status
    /// still transitions.
    pub fn unpublish(&self) -> Result<UnpublishResult, PublishError> {
        let mut status = self.status.lock();

        let report = clear_contents(&self.root)?;
        for failure in &report.failures {
            log!("unpublish"; "{}", failure);
        }

        *status = ServerStatus::Stopped;

        Ok(UnpublishResult {
            removed: report.removed,
            warnings: report.failures,
        })
    }

    fn write_file(&self, file: &PlannedFile<'_>, tag: &str) -> Result<(), PublishError> {
        let target = self.root.join(&file.rel);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| PublishError::io(Step::CreateDir, parent, e))?;
        }

        let written = if file.rel == self.options.entry {
            fs::write(&target, rewrite_asset_refs(file.content, tag))
        } else {
            fs::write(&target, file.content)
        };
        written.map_err(|e| PublishError::io(Step::Write, &target, e))?;

        set_mode(&target, self.options.file_mode)
    }
}

/// Validate every name up front. Returns the planned writes and the number
/// of entries skipped for an empty name.
fn plan_files(bundle: &PublishBundle) -> Result<(Vec<PlannedFile<'_>>, usize), PublishError> {
    let mut skipped = 0;
    let mut plan = Vec::with_capacity(bundle.files.len());

    for entry in &bundle.files {
        if entry.name.is_empty() {
            skipped += 1;
            continue;
        }
        plan.push(PlannedFile {
            rel: normalize_name(&entry.name)?,
            content: &entry.content,
        });
    }

    Ok((plan, skipped))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), PublishError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| PublishError::io(Step::Permissions, path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), PublishError> {
    Ok(())
}
