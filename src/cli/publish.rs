//! One-shot `publish` and `unpublish` commands.

use crate::config::SiteConfig;
use crate::engine::{PublishBundle, Publisher};
use crate::log;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Publish a JSON bundle file to the configured directory.
pub fn publish_file(config: &SiteConfig, bundle_path: &Path, label: Option<&str>) -> Result<()> {
    let content = fs::read_to_string(bundle_path)
        .with_context(|| format!("Failed to read bundle {}", bundle_path.display()))?;
    let mut bundle: PublishBundle = serde_json::from_str(&content)
        .with_context(|| format!("Invalid bundle {}", bundle_path.display()))?;

    if let Some(label) = label {
        bundle = bundle.with_version(label);
    }

    let publisher = Publisher::new(config.publish.dir.clone(), config.publish.options());
    let result = publisher.publish(&bundle)?;

    log!("publish"; "{} files to {} (tag {})",
        result.files_written, publisher.root().display(), result.cache_tag);
    if result.skipped > 0 {
        log!("publish"; "skipped {} unnamed entries", result.skipped);
    }
    Ok(())
}

/// Empty the configured directory.
pub fn unpublish(config: &SiteConfig) -> Result<()> {
    let publisher = Publisher::new(config.publish.dir.clone(), config.publish.options());
    let result = publisher.unpublish()?;

    log!("unpublish"; "removed {} entries from {}", result.removed, publisher.root().display());
    if !result.warnings.is_empty() {
        anyhow::bail!("{} entries could not be removed", result.warnings.len());
    }
    Ok(())
}
