//! `[publish]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [publish]
//! dir = "/var/www/published"          # Served directory (contents are replaced)
//! builder_dir = "/usr/src/app/builder" # Builder UI served on the admin port
//! entry = "index.html"                # Document whose assets get `?v=` tags
//! file_mode = 0o644                   # Permissions of written files
//! default_version = "latest"          # Cache tag label when none is sent
//! ```

use crate::config::ConfigDiagnostics;
use crate::engine::{self, PublishOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Publish target settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Published root. Its contents are replaced on every publish; the
    /// directory itself is kept.
    pub dir: PathBuf,

    /// Static files of the builder application.
    pub builder_dir: PathBuf,

    /// Entry document, relative to `dir`.
    pub entry: String,

    /// Unix permission bits for written files.
    pub file_mode: u32,

    /// Label for the cache tag when a publish carries no version.
    pub default_version: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/var/www/published"),
            builder_dir: PathBuf::from("/usr/src/app/builder"),
            entry: engine::DEFAULT_ENTRY.to_string(),
            file_mode: engine::DEFAULT_FILE_MODE,
            default_version: engine::DEFAULT_LABEL.to_string(),
        }
    }
}

impl PublishConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if engine::normalize_name(&self.entry).is_err() {
            diag.error_with_hint(
                "publish.entry",
                format!("`{}` is not a relative file path", self.entry),
                "use a path inside the published directory, e.g. `index.html`",
            );
        }
        if self.file_mode > 0o777 {
            diag.error(
                "publish.file_mode",
                format!("{:#o} has bits outside 0o777", self.file_mode),
            );
        }
        if self.default_version.is_empty() {
            diag.error("publish.default_version", "must not be empty");
        }
        if self.dir.as_os_str().is_empty() {
            diag.error("publish.dir", "must not be empty");
        }
    }

    /// Engine settings for this section.
    ///
    /// Call after `validate`: an invalid `entry` falls back to the default.
    pub fn options(&self) -> PublishOptions {
        PublishOptions {
            entry: engine::normalize_name(&self.entry)
                .unwrap_or_else(|_| PathBuf::from(engine::DEFAULT_ENTRY)),
            default_label: self.default_version.clone(),
            file_mode: self.file_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use std::path::Path;

    #[test]
    fn test_publish_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.publish.dir, Path::new("/var/www/published"));
        assert_eq!(config.publish.entry, "index.html");
        assert_eq!(config.publish.file_mode, 0o644);
        assert_eq!(config.publish.default_version, "latest");
    }

    #[test]
    fn test_publish_config_octal_mode() {
        let config = test_parse_config("[publish]\nfile_mode = 0o640\nentry = \"./app/index.html\"");
        assert_eq!(config.publish.file_mode, 0o640);

        let options = config.publish.options();
        assert_eq!(options.entry, Path::new("app/index.html"));
        assert_eq!(options.file_mode, 0o640);
    }

    #[test]
    fn test_publish_config_invalid_values() {
        let config = test_parse_config(
            "[publish]\nentry = \"../outside.html\"\nfile_mode = 0o4755\ndefault_version = \"\"",
        );
        let mut diag = ConfigDiagnostics::new();
        config.publish.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["publish.entry", "publish.file_mode", "publish.default_version"]
        );
    }
}
