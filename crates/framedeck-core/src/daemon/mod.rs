//! The mode arbiter: a two-state daemon switching the visible wallpaper
//! between a static image and the live renderer based on observed
//! deployment activity.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::wallpaper::{StaticPool, WallpaperControl};
use crate::watch::ActivityWatcher;

/// Granularity of stop-flag checks while sleeping between ticks.
const STOP_POLL: Duration = Duration::from_millis(200);

/// The arbiter's belief about which wallpaper mode is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperMode {
    /// Initial state only; never re-entered after the first switch.
    Unknown,
    Static,
    Live,
}

/// Level-triggered two-state machine over deployment activity.
///
/// Each tick compares observed truth against held state and switches only
/// on a difference, so repeated identical observations never re-issue the
/// expensive OS call. The watcher does not need to catch transition
/// moments; the arbiter derives the edges itself.
pub struct ModeArbiter<W, C> {
    watcher: W,
    control: C,
    pool: StaticPool,
    mode: WallpaperMode,
}

impl<W: ActivityWatcher, C: WallpaperControl> ModeArbiter<W, C> {
    pub fn new(watcher: W, control: C, pool: StaticPool) -> Self {
        Self {
            watcher,
            control,
            pool,
            mode: WallpaperMode::Unknown,
        }
    }

    pub fn mode(&self) -> WallpaperMode {
        self.mode
    }

    /// Evaluate one observation. Returns the mode switched to, if any.
    pub fn tick(&mut self) -> Option<WallpaperMode> {
        let deploy_active = self.watcher.is_deploy_active();

        if deploy_active && self.mode != WallpaperMode::Static {
            let Some(image) = self.pool.pick() else {
                warn!("No static images found in {}", self.pool.root().display());
                return None;
            };
            info!(
                "Deploy activity detected; switching to static image {}",
                image.display()
            );
            if let Err(err) = self.control.set_static_image(&image) {
                // State unchanged: the next tick retries the switch.
                warn!("Failed to set static wallpaper: {err:#}");
                return None;
            }
            self.mode = WallpaperMode::Static;
            return Some(self.mode);
        }

        if !deploy_active && self.mode != WallpaperMode::Live {
            info!("No deploy activity; restoring live renderer");
            if let Err(err) = self.control.activate_live() {
                warn!("Failed to activate live renderer: {err:#}");
                return None;
            }
            self.mode = WallpaperMode::Live;
            return Some(self.mode);
        }

        None
    }

    /// Poll on a fixed wall-clock interval until `stop` is set.
    ///
    /// The stop flag is honored between short sleep slices, so external
    /// termination (signal handler setting the flag) takes effect promptly
    /// and never interrupts a mode switch mid-way.
    pub fn run(&mut self, interval: Duration, stop: &AtomicBool) {
        info!("Mode arbiter running; polling every {interval:?}");
        while !stop.load(Ordering::Relaxed) {
            self.tick();

            let deadline = Instant::now() + interval;
            loop {
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                std::thread::sleep(remaining.min(STOP_POLL));
            }
        }
    }
}
