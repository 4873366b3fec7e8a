//! Staging: a canonical frame sequence built from the latest run.
//!
//! The staging area is idempotent storage, not a single-use temp dir: it is
//! created lazily under the parent directory, reused across invocations,
//! and re-running overwrites the `frame_NNN.png` files in place. Source
//! runs are only ever read, never mutated or deleted.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use tracing::warn;

use crate::fs::copy_preserving_mtime;

/// Name of the staging subdirectory under each view's parent directory.
pub const STAGING_DIR_NAME: &str = "staging";
/// Provenance manifest an external frame generator drops into a run.
pub const MANIFEST_NAME: &str = "manifest.json";
/// Name the manifest is carried forward under in staging and projects.
pub const STAGED_MANIFEST_NAME: &str = "current_manifest.json";

/// Result of staging the latest run under a parent directory.
#[derive(Debug)]
pub enum StageOutcome {
    Staged(StagedRun),
    /// No run folders exist under the parent directory.
    NoRuns,
    /// The latest run folder holds no PNG frames.
    NoFrames { run: PathBuf },
}

/// A populated staging area.
#[derive(Debug)]
pub struct StagedRun {
    pub staging_dir: PathBuf,
    pub source_run: PathBuf,
    pub frame_count: usize,
    pub manifest_copied: bool,
}

/// Stage the most recently modified run folder into `<parent>/staging`.
///
/// Frames are copied (never moved) and renamed to a contiguous, zero-padded
/// `frame_000.png …` sequence reflecting lexical source order, regardless
/// of the original filenames.
pub fn stage_latest_run(parent_dir: &Path) -> anyhow::Result<StageOutcome> {
    let Some(latest) = latest_run(parent_dir)? else {
        return Ok(StageOutcome::NoRuns);
    };

    let frames = list_frames(&latest)?;
    if frames.is_empty() {
        return Ok(StageOutcome::NoFrames { run: latest });
    }

    let staging_dir = parent_dir.join(STAGING_DIR_NAME);
    std::fs::create_dir_all(&staging_dir)
        .with_context(|| format!("Failed to create staging dir: {}", staging_dir.display()))?;

    for (index, frame) in frames.iter().enumerate() {
        let target = staging_dir.join(format!("frame_{index:03}.png"));
        std::fs::copy(frame, &target)
            .with_context(|| format!("Failed to stage frame {}", frame.display()))?;
    }

    // Manifest carry-over is best-effort: a failure is logged, never fatal.
    let manifest_copied = match copy_manifest(&latest, &staging_dir) {
        Ok(copied) => copied,
        Err(err) => {
            warn!("Could not copy manifest from {}: {err:#}", latest.display());
            false
        }
    };

    Ok(StageOutcome::Staged(StagedRun {
        staging_dir,
        source_run: latest,
        frame_count: frames.len(),
        manifest_copied,
    }))
}

/// Pick the run folder with the newest modification time.
///
/// Run folder names are not assumed sortable or chronological. On an mtime
/// tie the first candidate encountered wins.
fn latest_run(parent_dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(parent_dir)
        .with_context(|| format!("Failed to list {}", parent_dir.display()))?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry under {}", parent_dir.display()))?;
        let path = entry.path();
        if !path.is_dir() || entry.file_name() == STAGING_DIR_NAME {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        let newer = latest
            .as_ref()
            .map(|(best, _)| modified > *best)
            .unwrap_or(true);
        if newer {
            latest = Some((modified, path));
        }
    }
    Ok(latest.map(|(_, path)| path))
}

/// PNG frames of a run, sorted lexically by file name.
fn list_frames(run: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(run)
        .with_context(|| format!("Failed to list run folder: {}", run.display()))?;
    let mut frames = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry under {}", run.display()))?;
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if path.is_file() && is_png {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Copy `manifest.json` into staging as `current_manifest.json`, carrying
/// the source modification time across. Returns `false` when the run has no
/// manifest; that is not an error.
fn copy_manifest(run: &Path, staging_dir: &Path) -> anyhow::Result<bool> {
    let source = run.join(MANIFEST_NAME);
    if !source.is_file() {
        return Ok(false);
    }
    copy_preserving_mtime(&source, &staging_dir.join(STAGED_MANIFEST_NAME))?;
    Ok(true)
}
