//! Deployment of staged frames into a live-renderer project.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::fs::copy_preserving_mtime;
use crate::staging::STAGED_MANIFEST_NAME;

/// Asset subdirectory the live renderer reads frames from.
pub const MATERIALS_DIR_NAME: &str = "materials";

/// Result of one project deployment.
#[derive(Debug)]
pub enum DeployOutcome {
    /// Stage-only mode: nothing copied, staging left ready for inspection.
    StageOnly,
    /// The project has no `materials` directory; recoverable, skip it.
    MissingMaterials { project_path: PathBuf },
    Deployed(DeployReport),
}

#[derive(Debug)]
pub struct DeployReport {
    pub frames_copied: usize,
    pub manifest_written: bool,
    pub warnings: Vec<String>,
}

/// Copy staged frames into `<project>/materials`.
///
/// Each copy preserves the source modification time so consumers that sort
/// by mtime see the staged ordering. The staged manifest, when present, is
/// dropped next to the project root as `current_manifest.json` on a
/// best-effort basis: a failure there becomes a warning, not an error.
pub fn deploy_staged_frames(
    staging_dir: &Path,
    project_path: &Path,
    stage_only: bool,
) -> anyhow::Result<DeployOutcome> {
    if stage_only {
        return Ok(DeployOutcome::StageOnly);
    }

    let materials = project_path.join(MATERIALS_DIR_NAME);
    if !materials.is_dir() {
        return Ok(DeployOutcome::MissingMaterials {
            project_path: project_path.to_path_buf(),
        });
    }

    let mut frames = staged_frames(staging_dir)?;
    frames.sort();

    let mut frames_copied = 0;
    for frame in &frames {
        let name = frame
            .file_name()
            .context("staged frame without a file name")?;
        copy_preserving_mtime(frame, &materials.join(name))?;
        frames_copied += 1;
    }

    let mut warnings = Vec::new();
    let mut manifest_written = false;
    let staged_manifest = staging_dir.join(STAGED_MANIFEST_NAME);
    if staged_manifest.is_file() {
        match copy_preserving_mtime(&staged_manifest, &project_path.join(STAGED_MANIFEST_NAME)) {
            Ok(()) => manifest_written = true,
            Err(err) => warnings.push(format!(
                "Could not copy manifest into {}: {err:#}",
                project_path.display()
            )),
        }
    }

    Ok(DeployOutcome::Deployed(DeployReport {
        frames_copied,
        manifest_written,
        warnings,
    }))
}

/// `frame_*.png` files currently in staging.
fn staged_frames(staging_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(staging_dir)
        .with_context(|| format!("Failed to list staging dir: {}", staging_dir.display()))?;
    let mut frames = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry under {}", staging_dir.display()))?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if path.is_file() && name.starts_with("frame_") && name.ends_with(".png") {
            frames.push(path);
        }
    }
    Ok(frames)
}
