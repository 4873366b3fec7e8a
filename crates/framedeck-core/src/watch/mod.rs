//! Detection of a running deployment process.

use sysinfo::{ProcessesToUpdate, System};
use tracing::warn;

/// Reports whether a deployment batch is currently running.
///
/// Implementations report current truth, not transitions; the mode arbiter
/// derives edges itself by comparing against held state.
pub trait ActivityWatcher {
    fn is_deploy_active(&mut self) -> bool;
}

/// Scans the OS process list for a configured marker string.
pub struct ProcessScanWatcher {
    marker: String,
    system: System,
}

impl ProcessScanWatcher {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
            system: System::new(),
        }
    }

    /// Refresh the process table and scan names and command lines.
    fn scan(&mut self) -> anyhow::Result<bool> {
        // An empty marker would match every process.
        if self.marker.is_empty() {
            anyhow::bail!("deploy marker is empty");
        }

        self.system
            .refresh_processes(ProcessesToUpdate::All, true);
        for process in self.system.processes().values() {
            let name = process.name().to_string_lossy().to_lowercase();
            if name.contains(&self.marker) {
                return Ok(true);
            }
            let cmdline = process
                .cmd()
                .iter()
                .map(|arg| arg.to_string_lossy().to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            if cmdline.contains(&self.marker) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl ActivityWatcher for ProcessScanWatcher {
    /// Fail-safe: any scan failure reads as "no deployment active", so the
    /// daemon loop never crashes and never sticks in static mode.
    fn is_deploy_active(&mut self) -> bool {
        match self.scan() {
            Ok(active) => active,
            Err(err) => {
                warn!("Process scan failed, assuming no deploy: {err:#}");
                false
            }
        }
    }
}
