//! Platform abstraction layer
//!
//! Handles the few places the game touches the host:
//! - Storage location for settings and scores
//! - Wall-clock timestamps for leaderboard entries

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SETTINGS_FILE: &str = "math_catcher_settings.json";
pub const HIGHSCORES_FILE: &str = "math_catcher_scores.json";

/// Directory for persisted files: the override if given, else next to the
/// executable, else the working directory
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.to_path_buf();
        }
    }
    PathBuf::from(".")
}

pub fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

pub fn highscores_path(dir: &Path) -> PathBuf {
    dir.join(HIGHSCORES_FILE)
}

/// Unix timestamp in milliseconds
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a fresh run
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
