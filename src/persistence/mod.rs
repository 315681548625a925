//! JSON save/load for settings and high scores
//!
//! Writes go to `<file>.tmp` first and are renamed over the target, so a
//! crash mid-write leaves the previous file intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failure reading or writing a persisted file
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read and parse a JSON file. `Ok(None)` when the file does not exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&json)?))
}

/// Load a JSON file, falling back to `T::default()` when it is missing or
/// unreadable
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match load_json(path) {
        Ok(Some(value)) => {
            log::info!("Loaded {} from {}", what, path.display());
            value
        }
        Ok(None) => {
            log::info!("No {} at {}, using defaults", what, path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("Failed to load {} from {}: {}", what, path.display(), e);
            T::default()
        }
    }
}

/// Serialize to pretty JSON and atomically replace `path`
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
