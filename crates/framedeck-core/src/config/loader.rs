//! Loading and validating the two JSON configuration documents.
//!
//! A missing or unparseable document is fatal to the whole batch; no
//! partial parse is attempted. Errors always name the failing file.

use std::path::Path;

use anyhow::Context;

use super::schema::{ProjectRecord, ViewConfig};

/// Load the views document.
pub fn load_views(path: &Path) -> anyhow::Result<Vec<ViewConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Missing or unreadable views config: {}", path.display()))?;
    let views: Vec<ViewConfig> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    for (index, view) in views.iter().enumerate() {
        view.validate(index)
            .with_context(|| format!("Invalid record in {}", path.display()))?;
    }
    Ok(views)
}

/// Load the projects document.
pub fn load_projects(path: &Path) -> anyhow::Result<Vec<ProjectRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Missing or unreadable projects config: {}", path.display()))?;
    let projects: Vec<ProjectRecord> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    for (index, project) in projects.iter().enumerate() {
        project
            .validate(index)
            .with_context(|| format!("Invalid record in {}", path.display()))?;
    }
    Ok(projects)
}
