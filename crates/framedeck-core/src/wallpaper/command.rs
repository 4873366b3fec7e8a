//! Wallpaper switching by spawning configured commands.

use std::path::Path;
use std::process::Command;

use anyhow::Context;

use super::WallpaperControl;

/// Placeholder replaced with the image path in the static command.
pub const IMAGE_PLACEHOLDER: &str = "{image}";

/// Applies wallpaper modes by running user-configured commands.
///
/// Each mode switch is one external invocation, satisfying the atomicity
/// requirement of [`WallpaperControl`].
#[derive(Debug, Clone)]
pub struct CommandWallpaper {
    static_command: Vec<String>,
    live_command: Vec<String>,
}

impl CommandWallpaper {
    pub fn new(static_command: Vec<String>, live_command: Vec<String>) -> Self {
        Self {
            static_command,
            live_command,
        }
    }

    fn run(argv: &[String]) -> anyhow::Result<()> {
        let (program, args) = argv.split_first().context("empty wallpaper command")?;
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run {program}"))?;
        if !status.success() {
            anyhow::bail!("{program} exited with {status}");
        }
        Ok(())
    }
}

impl WallpaperControl for CommandWallpaper {
    fn set_static_image(&mut self, image: &Path) -> anyhow::Result<()> {
        let image = image.to_string_lossy();
        let argv: Vec<String> = self
            .static_command
            .iter()
            .map(|arg| arg.replace(IMAGE_PLACEHOLDER, &image))
            .collect();
        Self::run(&argv)
    }

    fn activate_live(&mut self) -> anyhow::Result<()> {
        Self::run(&self.live_command)
    }
}
