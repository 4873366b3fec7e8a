//! Schema for the views and projects documents.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One wallpaper view as listed in the views document.
///
/// Identity is derived from the attributes via `key::build_view_key`,
/// never stored. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ViewConfig {
    /// Human-entered view name.
    pub name: String,
    /// Optional variant qualifier (e.g. "night").
    #[serde(default)]
    pub variant: Option<String>,
    /// Optional display target hint; informational only.
    #[serde(default)]
    pub display: Option<String>,
}

/// One record of the projects document, mapping a human-entered base name
/// to a live-renderer project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Base name matched against view keys after canonicalization.
    pub view_name_base: String,
    /// Root directory of the live-renderer project.
    pub project_path: PathBuf,
}

/// Record-level validation failure in a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("view record {index}: 'name' must not be empty")]
    EmptyViewName { index: usize },
    #[error("project record {index}: 'view_name_base' must not be empty")]
    EmptyProjectBase { index: usize },
    #[error("project record {index}: 'project_path' must not be empty")]
    EmptyProjectPath { index: usize },
}

impl ViewConfig {
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyViewName { index });
        }
        Ok(())
    }
}

impl ProjectRecord {
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.view_name_base.trim().is_empty() {
            return Err(ConfigError::EmptyProjectBase { index });
        }
        if self.project_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyProjectPath { index });
        }
        Ok(())
    }
}
