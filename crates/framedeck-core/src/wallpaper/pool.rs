//! Random static image selection with time-of-day bands.

use std::path::{Path, PathBuf};

use chrono::Timelike;
use rand::Rng;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
/// Chance of mixing the `space` pool into an already-populated band.
const SPACE_MIX_CHANCE: f64 = 0.25;

/// Picks still images from a pool directory.
///
/// Prefers a subdirectory named after the current time-of-day band,
/// occasionally mixes in a `space` subdirectory, and finally falls back to
/// any image found anywhere under the root. Flat pool directories without
/// band subfolders work through the fallback scan.
#[derive(Debug, Clone)]
pub struct StaticPool {
    root: PathBuf,
}

impl StaticPool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pick one image at random, or `None` when the pool is empty.
    pub fn pick(&self) -> Option<PathBuf> {
        self.pick_for_hour(chrono::Local::now().hour())
    }

    fn pick_for_hour(&self, hour: u32) -> Option<PathBuf> {
        let mut rng = rand::rng();
        let mut candidates = images_in(&self.root.join(band_for_hour(hour)));
        if candidates.is_empty() || rng.random_bool(SPACE_MIX_CHANCE) {
            candidates.extend(images_in(&self.root.join("space")));
        }
        if candidates.is_empty() {
            candidates = images_under(&self.root);
        }
        if candidates.is_empty() {
            return None;
        }
        let index = rng.random_range(0..candidates.len());
        Some(candidates.swap_remove(index))
    }
}

/// Time band used to pick a themed subdirectory.
fn band_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=10 => "morning",
        11..=16 => "afternoon",
        _ => "evening",
    }
}

/// Images directly inside a directory; an unreadable directory is simply an
/// empty candidate set.
fn images_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image(path))
        .collect()
}

/// Recursive any-image fallback for flat or unconventional pool layouts.
fn images_under(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_image(&path) {
                found.push(path);
            }
        }
    }
    found
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"img").unwrap();
    }

    #[test]
    fn prefers_matching_time_band() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("morning/sunrise.png"));

        let pool = StaticPool::new(temp.path());
        let picked = pool.pick_for_hour(8).unwrap();
        assert_eq!(picked.file_name().unwrap(), "sunrise.png");
    }

    #[test]
    fn flat_pool_works_through_fallback() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("any.jpg"));

        let pool = StaticPool::new(temp.path());
        assert!(pool.pick_for_hour(8).is_some());
    }

    #[test]
    fn empty_pool_yields_none() {
        let temp = TempDir::new().unwrap();
        let pool = StaticPool::new(temp.path());
        assert!(pool.pick_for_hour(8).is_none());
    }

    #[test]
    fn non_image_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("notes.txt"));

        let pool = StaticPool::new(temp.path());
        assert!(pool.pick_for_hour(8).is_none());
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(band_for_hour(5), "morning");
        assert_eq!(band_for_hour(10), "morning");
        assert_eq!(band_for_hour(11), "afternoon");
        assert_eq!(band_for_hour(17), "evening");
        assert_eq!(band_for_hour(2), "evening");
    }
}
