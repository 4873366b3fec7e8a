//! Batch orchestration: match views to projects and drive the pipeline.
//!
//! One invocation processes every view once, strictly sequentially. A
//! recoverable failure at any stage ends only that view's deployment; the
//! batch always runs to completion and reports a summary. Only unreadable
//! or malformed configuration aborts the whole batch, before any per-view
//! work starts.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{self, ProjectRecord, Settings, ViewConfig};
use crate::deploy::{self, DeployOutcome};
use crate::key::{build_view_key, canonicalize};
use crate::source::find_parent_dir;
use crate::staging::{self, StageOutcome};

/// Why a view was skipped during a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No project record matches the view's canonical key.
    NoProjectMatch,
    /// No folder under the output root corresponds to the key.
    SourceNotFound { output_root: PathBuf },
    /// The source folder holds no run folders.
    NoRuns { parent_dir: PathBuf },
    /// The latest run holds no PNG frames.
    NoFrames { run: PathBuf },
    /// The project has no `materials` directory.
    MissingMaterials { project_path: PathBuf },
    /// An I/O failure ended this view's deployment.
    Failed { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoProjectMatch => write!(f, "no matching project entry"),
            SkipReason::SourceNotFound { output_root } => {
                write!(f, "source folder not found under {}", output_root.display())
            }
            SkipReason::NoRuns { parent_dir } => {
                write!(f, "no frame runs found in {}", parent_dir.display())
            }
            SkipReason::NoFrames { run } => {
                write!(f, "no PNG frames found in {}", run.display())
            }
            SkipReason::MissingMaterials { project_path } => {
                write!(f, "'materials' folder not found in {}", project_path.display())
            }
            SkipReason::Failed { message } => write!(f, "{message}"),
        }
    }
}

/// One successfully processed view.
#[derive(Debug)]
pub struct DeployedView {
    pub key: String,
    pub project_path: PathBuf,
    pub frames_staged: usize,
    pub frames_copied: usize,
    pub stage_only: bool,
    pub warnings: Vec<String>,
}

/// One skipped view, with a human-readable reason.
#[derive(Debug)]
pub struct SkippedView {
    pub key: String,
    pub reason: SkipReason,
}

/// Outcome of one batch. Exit status intentionally does not distinguish
/// partial failure from full success; the summary carries the detail.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub deployed: Vec<DeployedView>,
    pub skipped: Vec<SkippedView>,
}

/// Drives resolve -> stage -> deploy for every matched (view, project) pair.
#[derive(Debug)]
pub struct DeployOrchestrator {
    settings: Settings,
}

impl DeployOrchestrator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load both configuration documents and run one batch.
    ///
    /// Missing or malformed configuration is fatal; nothing is deployed.
    pub fn run_batch(&self) -> anyhow::Result<BatchSummary> {
        let views = config::load_views(&self.settings.views_path)?;
        let projects = config::load_projects(&self.settings.projects_path)?;
        Ok(self.run(&views, &projects))
    }

    /// Run one batch over already-loaded configuration.
    pub fn run(&self, views: &[ViewConfig], projects: &[ProjectRecord]) -> BatchSummary {
        let project_map = build_project_map(projects);
        let mut summary = BatchSummary::default();

        for view in views {
            let key = build_view_key(view);
            let Some(project_path) = lookup_project(&project_map, &key) else {
                warn!("Skipping '{key}': no matching entry in projects config");
                summary.skipped.push(SkippedView {
                    key,
                    reason: SkipReason::NoProjectMatch,
                });
                continue;
            };

            match self.deploy_view(&key, project_path) {
                Ok(Ok(deployed)) => summary.deployed.push(deployed),
                Ok(Err(reason)) => {
                    warn!("Skipping '{key}': {reason}");
                    summary.skipped.push(SkippedView { key, reason });
                }
                Err(err) => {
                    warn!("Deployment of '{key}' failed: {err:#}");
                    summary.skipped.push(SkippedView {
                        key,
                        reason: SkipReason::Failed {
                            message: format!("{err:#}"),
                        },
                    });
                }
            }
        }

        summary
    }

    /// One view's pipeline: resolve -> stage -> deploy.
    ///
    /// `Ok(Err(reason))` is a recoverable skip; `Err` is an I/O failure that
    /// likewise ends only this view. Staging is deliberately left intact on
    /// later-stage misses: it is idempotent and cheap to leave for the next
    /// run.
    fn deploy_view(
        &self,
        key: &str,
        project_path: &Path,
    ) -> anyhow::Result<Result<DeployedView, SkipReason>> {
        info!("Deploying '{key}'");

        let Some(parent_dir) = find_parent_dir(&self.settings.output_root, key)? else {
            return Ok(Err(SkipReason::SourceNotFound {
                output_root: self.settings.output_root.clone(),
            }));
        };

        let staged = match staging::stage_latest_run(&parent_dir)? {
            StageOutcome::Staged(staged) => staged,
            StageOutcome::NoRuns => return Ok(Err(SkipReason::NoRuns { parent_dir })),
            StageOutcome::NoFrames { run } => return Ok(Err(SkipReason::NoFrames { run })),
        };
        info!(
            "Staged {} frames from {}",
            staged.frame_count,
            staged.source_run.display()
        );

        let outcome = deploy::deploy_staged_frames(
            &staged.staging_dir,
            project_path,
            self.settings.stage_only,
        )?;
        match outcome {
            DeployOutcome::StageOnly => {
                info!("Stage-only mode: skipping copy into {}", project_path.display());
                Ok(Ok(DeployedView {
                    key: key.to_string(),
                    project_path: project_path.to_path_buf(),
                    frames_staged: staged.frame_count,
                    frames_copied: 0,
                    stage_only: true,
                    warnings: Vec::new(),
                }))
            }
            DeployOutcome::MissingMaterials { project_path } => {
                Ok(Err(SkipReason::MissingMaterials { project_path }))
            }
            DeployOutcome::Deployed(report) => {
                info!("Deployment complete: copied {} frames", report.frames_copied);
                for warning in &report.warnings {
                    warn!("{warning}");
                }
                Ok(Ok(DeployedView {
                    key: key.to_string(),
                    project_path: project_path.to_path_buf(),
                    frames_staged: staged.frame_count,
                    frames_copied: report.frames_copied,
                    stage_only: false,
                    warnings: report.warnings,
                }))
            }
        }
    }
}

/// Build the canonical-key -> project-path map.
///
/// Later records overwrite earlier ones on a colliding canonical key.
/// Last-wins is deliberate policy, deterministic given input order.
pub fn build_project_map(projects: &[ProjectRecord]) -> HashMap<String, PathBuf> {
    let mut map = HashMap::new();
    for record in projects {
        map.insert(
            canonicalize(&record.view_name_base),
            record.project_path.clone(),
        );
    }
    map
}

/// Direct lookup first, then a canonicalized retry covering keys built
/// before a canonicalization rule change.
fn lookup_project<'a>(map: &'a HashMap<String, PathBuf>, key: &str) -> Option<&'a PathBuf> {
    map.get(key).or_else(|| map.get(&canonicalize(key)))
}
