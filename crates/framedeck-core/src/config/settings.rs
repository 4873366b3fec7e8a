//! Pipeline settings with documented defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::wallpaper::IMAGE_PLACEHOLDER;

/// Environment toggle forcing stage-only mode, read once at startup.
pub const STAGE_ONLY_ENV: &str = "FRAMEDECK_STAGE_ONLY";

/// Everything the pipeline needs to know about its environment, injected
/// explicitly into each component. Loadable from an optional JSON document;
/// missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory holding per-view frame-set output.
    pub output_root: PathBuf,
    /// Pool of still images shown while a deployment runs.
    pub static_dir: PathBuf,
    /// Views document consumed by the orchestrator.
    pub views_path: PathBuf,
    /// Projects document consumed by the orchestrator.
    pub projects_path: PathBuf,
    /// Token searched for in the process list to detect a running deploy.
    pub deploy_marker: String,
    /// Command re-activating the live renderer.
    pub live_command: Vec<String>,
    /// Command applying a static image; `{image}` is substituted.
    pub static_command: Vec<String>,
    /// Seconds between daemon polls of the process list.
    pub poll_interval_secs: u64,
    /// Stage frames without copying them into the projects.
    pub stage_only: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("framedeck");
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("framedeck");
        Self {
            output_root: data_dir.join("output"),
            static_dir: data_dir.join("static_backgrounds"),
            views_path: config_dir.join("views.json"),
            projects_path: config_dir.join("projects.json"),
            deploy_marker: "framedeck deploy".to_string(),
            live_command: vec!["xdg-open".into(), "steam://rungameid/431960".into()],
            static_command: vec!["swww".into(), "img".into(), IMAGE_PLACEHOLDER.into()],
            poll_interval_secs: 5,
            stage_only: false,
        }
    }
}

impl Settings {
    /// Default location of the optional settings document.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("framedeck")
            .join("framedeck.json")
    }

    /// Load settings from a JSON document, falling back to defaults when
    /// the file does not exist. A malformed document is fatal and names
    /// the file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", path.display()))?
        } else {
            Self::default()
        };
        settings.apply_env();
        Ok(settings)
    }

    /// Honor the stage-only environment toggle.
    pub fn apply_env(&mut self) {
        if std::env::var(STAGE_ONLY_ENV).map(|v| v == "1").unwrap_or(false) {
            self.stage_only = true;
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
