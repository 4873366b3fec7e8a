//! OS wallpaper primitives and the static image pool.

mod command;
mod pool;

pub use command::{CommandWallpaper, IMAGE_PLACEHOLDER};
pub use pool::StaticPool;

use std::path::Path;

/// The two wallpaper mode switches.
///
/// Both are synchronous, fallible, and idempotent: re-applying the current
/// mode is harmless. Each switch must be a single atomic operation so an
/// interrupted daemon never leaves a transition half-applied.
pub trait WallpaperControl {
    /// Show a single still image.
    fn set_static_image(&mut self, image: &Path) -> anyhow::Result<()>;
    /// Hand the desktop back to the live renderer.
    fn activate_live(&mut self) -> anyhow::Result<()>;
}
