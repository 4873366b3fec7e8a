//! Framedeck Core Library
//!
//! Domain logic for the rotating-wallpaper deployment pipeline: canonical
//! key matching, staging of generated frame runs, deployment into the live
//! renderer's project folders, and the daemon that arbitrates between
//! static and live wallpaper modes while a deployment runs.

pub mod config;
pub mod daemon;
pub mod deploy;
pub mod fs;
pub mod key;
pub mod orchestration;
pub mod source;
pub mod staging;
pub mod wallpaper;
pub mod watch;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigError, ProjectRecord, Settings, ViewConfig};

    // Keys
    pub use crate::key::{build_view_key, canonicalize};

    // Pipeline
    pub use crate::deploy::{DeployOutcome, DeployReport};
    pub use crate::orchestration::{BatchSummary, DeployOrchestrator, SkipReason};
    pub use crate::source::find_parent_dir;
    pub use crate::staging::{StageOutcome, StagedRun};

    // Daemon
    pub use crate::daemon::{ModeArbiter, WallpaperMode};
    pub use crate::wallpaper::{CommandWallpaper, StaticPool, WallpaperControl};
    pub use crate::watch::{ActivityWatcher, ProcessScanWatcher};
}
