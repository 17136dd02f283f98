//! Configuration management for `siteswap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [publish] and [serve]
//! ├── types/         # ConfigError, global handle
//! ├── util.rs        # config file discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! A missing config file is not an error: every field has a default, and
//! CLI flags override file values.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{PublishConfig, ServeConfig};
pub use types::{ConfigDiagnostics, ConfigError, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing siteswap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Published directory and cache tag settings
    #[serde(default)]
    pub publish: PublishConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// are used and paths resolve against cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        config.normalize_paths();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply CLI overrides on top of file values.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.publish.dir, cli.dir.as_ref());

        if let Commands::Serve {
            interface,
            admin_port,
            public_port,
            builder_dir,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.admin_port, admin_port.as_ref());
            Self::update_option(&mut self.serve.public_port, public_port.as_ref());
            Self::update_option(&mut self.publish.builder_dir, builder_dir.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve directories against the config root.
    fn normalize_paths(&mut self) {
        use crate::utils::path::resolve_dir;

        self.publish.dir = resolve_dir(&self.publish.dir, &self.root);
        self.publish.builder_dir = resolve_dir(&self.publish.builder_dir, &self.root);
    }

    /// Validate all sections, reporting every error at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.publish.validate(&mut diag);
        self.serve.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            SiteConfig::parse_with_ignored("[publish]\ndirr = \"/tmp\"\n[extra]\nx = 1").unwrap();
        assert_eq!(ignored.len(), 2);
        assert!(ignored.iter().any(|f| f == "publish.dirr"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[serve\nport = ").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("siteswap.toml");
        fs::write(
            &config_path,
            "[publish]\ndir = \"out\"\nbuilder_dir = \"ui\"\n[serve]\nadmin_port = 7000",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "siteswap",
            "--config",
            config_path.to_str().unwrap(),
            "serve",
            "--admin-port",
            "7100",
        ]);
        let config = SiteConfig::load(&cli).unwrap();

        assert_eq!(config.serve.admin_port, 7100);
        assert_eq!(config.publish.dir, dir.path().join("out"));
        assert_eq!(config.publish.builder_dir, dir.path().join("ui"));
        assert_eq!(config.config_path, config_path);
    }

    #[test]
    fn test_dir_flag_overrides_publish_dir() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("siteswap.toml");
        fs::write(&config_path, "[publish]\ndir = \"out\"").unwrap();

        let target = dir.path().join("elsewhere");
        let cli = Cli::parse_from([
            "siteswap",
            "--config",
            config_path.to_str().unwrap(),
            "--dir",
            target.to_str().unwrap(),
            "unpublish",
        ]);
        let config = SiteConfig::load(&cli).unwrap();
        assert_eq!(config.publish.dir, target);
    }

    #[test]
    fn test_validation_errors_surface() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("siteswap.toml");
        fs::write(&config_path, "[serve]\nadmin_port = 1\npublic_port = 1").unwrap();

        let cli = Cli::parse_from(["siteswap", "-C", config_path.to_str().unwrap(), "unpublish"]);
        let err = SiteConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("serve.public_port"));
    }
}
