//! Framedeck - rotating wallpaper deployment pipeline
//!
//! Usage:
//!   framedeck deploy   # Stage and deploy the latest frame runs
//!   framedeck watch    # Arbitrate wallpaper modes while deploys run

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use framedeck_core::config::Settings;
use framedeck_core::daemon::ModeArbiter;
use framedeck_core::orchestration::{BatchSummary, DeployOrchestrator};
use framedeck_core::wallpaper::{CommandWallpaper, StaticPool};
use framedeck_core::watch::ProcessScanWatcher;

#[derive(Parser)]
#[command(name = "framedeck")]
#[command(about = "Rotating wallpaper deployment pipeline", long_about = None)]
struct Cli {
    /// Settings file (JSON); defaults are used when absent
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage the latest frame runs and deploy them into matched projects
    ///
    /// The batch always runs to completion: views that cannot be matched,
    /// resolved, or deployed are skipped and reported in the summary.
    Deploy {
        /// Views document (overrides settings)
        #[arg(long)]
        views: Option<PathBuf>,

        /// Projects document (overrides settings)
        #[arg(long)]
        projects: Option<PathBuf>,

        /// Root directory holding generated frame sets
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Stage frames without copying them into the projects
        #[arg(long)]
        stage_only: bool,
    },

    /// Watch for deploy activity and arbitrate the wallpaper mode
    ///
    /// Runs until interrupted. While a deploy is active the desktop shows a
    /// static image from the pool; otherwise the live renderer is restored.
    Watch {
        /// Seconds between process-list polls
        #[arg(long)]
        interval: Option<u64>,

        /// Directory holding the static image pool
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "framedeck=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);
    tracing::debug!("Using settings from {}", settings_path.display());
    let settings = Settings::load(&settings_path)?;

    match cli.command {
        Commands::Deploy {
            views,
            projects,
            output_root,
            stage_only,
        } => run_deploy(settings, views, projects, output_root, stage_only),
        Commands::Watch {
            interval,
            static_dir,
        } => run_watch(settings, interval, static_dir),
    }
}

fn run_deploy(
    mut settings: Settings,
    views: Option<PathBuf>,
    projects: Option<PathBuf>,
    output_root: Option<PathBuf>,
    stage_only: bool,
) -> Result<()> {
    if let Some(views) = views {
        settings.views_path = views;
    }
    if let Some(projects) = projects {
        settings.projects_path = projects;
    }
    if let Some(output_root) = output_root {
        settings.output_root = output_root;
    }
    settings.stage_only |= stage_only;

    let orchestrator = DeployOrchestrator::new(settings);
    let summary = orchestrator.run_batch()?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    for view in &summary.deployed {
        if view.stage_only {
            println!(
                "✓ Staged '{}' ({} frames, stage-only)",
                view.key, view.frames_staged
            );
        } else {
            println!(
                "✓ Deployed '{}' ({} frames -> {})",
                view.key,
                view.frames_copied,
                view.project_path.display()
            );
        }
        for warning in &view.warnings {
            println!("  ⚠ {warning}");
        }
    }
    for view in &summary.skipped {
        println!("• Skipped '{}': {}", view.key, view.reason);
    }
    println!(
        "Done: {} deployed, {} skipped.",
        summary.deployed.len(),
        summary.skipped.len()
    );
}

fn run_watch(
    mut settings: Settings,
    interval: Option<u64>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(interval) = interval {
        settings.poll_interval_secs = interval;
    }
    if let Some(static_dir) = static_dir {
        settings.static_dir = static_dir;
    }

    let stop = Arc::new(AtomicBool::new(false));
    #[cfg(unix)]
    {
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))?;
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))?;
    }

    let watcher = ProcessScanWatcher::new(settings.deploy_marker.as_str());
    let control = CommandWallpaper::new(
        settings.static_command.clone(),
        settings.live_command.clone(),
    );
    let pool = StaticPool::new(settings.static_dir.clone());

    let mut arbiter = ModeArbiter::new(watcher, control, pool);
    arbiter.run(settings.poll_interval(), &stop);

    println!("Watcher stopped.");
    Ok(())
}
