//! Configuration documents and pipeline settings.
//!
//! Two JSON documents feed the orchestrator: a list of view records and a
//! list of project records. Everything else (paths, commands, intervals)
//! lives in [`Settings`], an explicit configuration object injected into
//! each component instead of hidden process-wide constants.

mod loader;
mod schema;
mod settings;

pub use loader::{load_projects, load_views};
pub use schema::{ConfigError, ProjectRecord, ViewConfig};
pub use settings::{STAGE_ONLY_ENV, Settings};
