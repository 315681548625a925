//! Game settings and preferences
//!
//! Persisted separately from high scores as JSON.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::Playfield;

/// Playfield resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const MIN: Resolution = Resolution::new(640, 480);
    pub const MAX: Resolution = Resolution::new(3840, 2160);
    pub const DEFAULT: Resolution = Resolution::new(800, 600);

    /// Common 4:3 and 16:9 choices
    pub const PRESETS: [Resolution; 8] = [
        Resolution::new(800, 600),
        Resolution::new(1024, 768),
        Resolution::new(1280, 960),
        Resolution::new(1400, 1050),
        Resolution::new(1280, 720),
        Resolution::new(1366, 768),
        Resolution::new(1600, 900),
        Resolution::new(1920, 1080),
    ];

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validate a user-entered resolution
    pub fn custom(width: u32, height: u32) -> Result<Self, SettingsError> {
        if width < Self::MIN.width || height < Self::MIN.height {
            return Err(SettingsError::TooSmall { width, height });
        }
        if width > Self::MAX.width || height > Self::MAX.height {
            return Err(SettingsError::TooLarge { width, height });
        }
        Ok(Self::new(width, height))
    }

    /// Parse "1024x768" (also accepts "1024 x 768")
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.split_once(['x', 'X'])?;
        let width = w.trim().parse().ok()?;
        let height = h.trim().parse().ok()?;
        Some(Self::new(width, height))
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width as f32, self.height as f32)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Rejected settings change
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{width}x{height} is below the minimum resolution {min}", min = Resolution::MIN)]
    TooSmall { width: u32, height: u32 },
    #[error("{width}x{height} is above the maximum resolution {max}", max = Resolution::MAX)]
    TooLarge { width: u32, height: u32 },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield size handed to each new session
    pub resolution: Resolution,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: Resolution::DEFAULT,
            master_volume: 0.8,
            sfx_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Switch to a custom resolution, rejecting out-of-range sizes
    pub fn set_resolution(&mut self, width: u32, height: u32) -> Result<(), SettingsError> {
        self.resolution = Resolution::custom(width, height)?;
        Ok(())
    }

    /// Presets plus the current resolution if it is custom, smallest area first
    pub fn available_resolutions(&self) -> Vec<Resolution> {
        let mut list = Resolution::PRESETS.to_vec();
        if !list.contains(&self.resolution) {
            list.push(self.resolution);
            list.sort_by_key(|r| r.width * r.height);
        }
        list
    }

    pub fn playfield(&self) -> Playfield {
        self.resolution.playfield()
    }

    /// Clamp volumes into range (hand-edited files)
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        if Resolution::custom(self.resolution.width, self.resolution.height).is_err() {
            log::warn!(
                "Stored resolution {} out of range, using {}",
                self.resolution,
                Resolution::DEFAULT
            );
            self.resolution = Resolution::DEFAULT;
        }
    }

    /// Load settings, falling back to defaults if missing or unreadable
    pub fn load(path: &Path) -> Self {
        let mut settings: Settings = persistence::load_or_default(path, "settings");
        settings.sanitize();
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
