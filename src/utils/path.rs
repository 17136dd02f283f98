//! Filesystem path helpers for config values.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Expand `~` and resolve a configured directory against `base`.
///
/// Absolute results are kept as-is. The directory may not exist yet, so no
/// canonicalization happens here.
pub fn resolve_dir(path: &Path, base: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded: Cow<'_, str> = shellexpand::tilde(&raw);
    let expanded = Path::new(expanded.as_ref());

    if expanded.is_absolute() {
        expanded.to_path_buf()
    } else {
        base.join(expanded)
    }
}
