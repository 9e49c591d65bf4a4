//! Game settings
//!
//! Read from `extinguished.json` in the working directory when present.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAME_SIZE, SCREEN_SIZE};

/// Error type for loading settings
#[derive(Debug)]
pub enum SettingsError {
    /// File I/O error
    Io(std::io::Error),
    /// Malformed JSON
    Parse(serde_json::Error),
    /// Parsed but unusable values
    Validation(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Window size in pixels
    pub screen_size: Vec2,
    /// Frame-rate cap (0 = unbounded)
    pub fps: u32,
    /// Show collision circles and the aim line
    pub debug: bool,

    // === World ===
    /// Size of the playable area
    pub game_size: Vec2,
    /// Number of asteroids spawned at start
    pub obstacle_count: usize,
    /// Seed for obstacle placement and smoke
    pub seed: u64,

    // === Physics ===
    /// Negate the player's velocity once per frame no matter how many
    /// obstacles it overlaps. Off: negate once per overlapping obstacle.
    pub bounce_once_per_frame: bool,

    // === Assets ===
    /// Directory holding the sprite images
    pub image_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_size: SCREEN_SIZE,
            fps: 0,
            debug: true,

            game_size: GAME_SIZE,
            obstacle_count: 10,
            seed: 0x5eed,

            bounce_once_per_frame: false,

            image_dir: PathBuf::from("images"),
        }
    }
}

impl Settings {
    /// Settings file looked up by [`Settings::load`]
    pub const FILE_NAME: &'static str = "extinguished.json";

    /// Largest accepted width or height for `screen_size` and `game_size`
    pub const MAX_SIDE: f32 = 16384.0;

    /// Frame rate used when stepping without a real clock
    pub const FALLBACK_FPS: u32 = 60;

    /// Fixed delta-time for headless stepping
    pub fn frame_dt(&self) -> f32 {
        let fps = if self.fps == 0 {
            Self::FALLBACK_FPS
        } else {
            self.fps
        };
        1.0 / fps as f32
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from [`Settings::FILE_NAME`], falling back to defaults
    pub fn load() -> Self {
        Self::load_or_default(Path::new(Self::FILE_NAME))
    }

    /// Load from `path`; a missing, malformed or invalid file gives defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let check = |name: &str, v: Vec2| {
            if !(v.x > 0.0 && v.y > 0.0) {
                return Err(SettingsError::Validation(format!(
                    "{} must be positive, got {}",
                    name, v
                )));
            }
            if v.x > Self::MAX_SIDE || v.y > Self::MAX_SIDE {
                return Err(SettingsError::Validation(format!(
                    "{} must be at most {} per side, got {}",
                    name,
                    Self::MAX_SIDE,
                    v
                )));
            }
            Ok(())
        };
        check("screen_size", self.screen_size)?;
        check("game_size", self.game_size)
    }
}
