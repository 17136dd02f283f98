//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// An absolute `config_name` is used as-is when it exists.
///
/// ```text
/// /srv/site/builder/   ← cwd
/// /srv/site/siteswap.toml  ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_absolute_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("siteswap.toml");
        assert_eq!(find_config_file(&path), None);

        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path), Some(path));
    }
}
