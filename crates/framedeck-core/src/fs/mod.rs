//! Filesystem primitives shared across staging and deployment.

use std::path::Path;

use anyhow::Context;

/// Copy a file and carry the source modification time onto the copy.
///
/// `fs::copy` alone does not guarantee timestamps. Downstream consumers of
/// deployed frames order them by mtime, so the copy must keep it.
pub fn copy_preserving_mtime(source: &Path, target: &Path) -> anyhow::Result<()> {
    std::fs::copy(source, target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;
    let modified = std::fs::metadata(source)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("Failed to read mtime of {}", source.display()))?;
    let file = std::fs::OpenOptions::new()
        .write(true)
        .open(target)
        .with_context(|| format!("Failed to open {} for mtime update", target.display()))?;
    file.set_modified(modified)
        .with_context(|| format!("Failed to set mtime on {}", target.display()))?;
    Ok(())
}
