//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve URL to a file under `serve_root`, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize so symlinks cannot lead outside serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: strip query string and fragment, decode, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("docs/index.html"), "docs").unwrap();
        fs::write(dir.path().join("my file.css"), "css").unwrap();
        dir
    }

    #[test]
    fn test_root_resolves_to_index() {
        let dir = site();
        let path = resolve_path("/", dir.path()).unwrap();
        assert!(path.ends_with("index.html"));
    }

    #[test]
    fn test_directory_and_query() {
        let dir = site();
        let path = resolve_path("/docs/?v=1", dir.path()).unwrap();
        assert!(path.ends_with("docs/index.html"));
    }

    #[test]
    fn test_percent_decoding() {
        let dir = site();
        assert!(resolve_path("/my%20file.css", dir.path()).is_some());
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = site();
        assert!(resolve_path("/../etc/passwd", dir.path()).is_none());
        assert!(resolve_path("/docs/%2e%2e/%2e%2e/x", dir.path()).is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = site();
        assert!(resolve_path("/missing.js", dir.path()).is_none());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_path("/", &dir.path().join("absent")).is_none());
    }
}
