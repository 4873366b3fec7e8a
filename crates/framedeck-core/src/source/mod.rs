//! Locating the on-disk parent directory for a canonical view key.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::key::canonicalize;

/// Find the directory under `output_root` holding a view's generated runs.
///
/// Tries an exact subdirectory named after the key first, then scans the
/// immediate children once and compares canonicalized names, which picks up
/// legacy folders named with symbol variants. The scan returns the first
/// match in directory listing order; that tie-break is deliberate policy
/// but not stable across filesystems.
///
/// `Ok(None)` means no match: a recoverable condition the caller logs and
/// skips. An unreadable `output_root` is an error.
pub fn find_parent_dir(
    output_root: &Path,
    canonical_key: &str,
) -> anyhow::Result<Option<PathBuf>> {
    let direct = output_root.join(canonical_key);
    if direct.is_dir() {
        return Ok(Some(direct));
    }

    let entries = std::fs::read_dir(output_root)
        .with_context(|| format!("Failed to list output root: {}", output_root.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry under {}", output_root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if canonicalize(&entry.file_name().to_string_lossy()) == canonical_key {
            return Ok(Some(path));
        }
    }

    Ok(None)
}
