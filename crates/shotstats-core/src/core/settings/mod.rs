//! Analysis Settings
//!
//! Optional JSON configuration for a report run:
//! - Frame rate used to convert timecodes
//! - Output rendering style
//! - Whether the leading/trailing boundary shots are excluded from category statistics
//!
//! Missing fields fall back to defaults, and out-of-range values are corrected
//! by [`AnalysisSettings::normalize`] instead of failing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::core::report::ReportStyle;
use crate::core::{CoreError, CoreResult, DEFAULT_FPS};

/// Settings schema version for migration support
pub const SETTINGS_VERSION: u32 = 1;

/// Upper bound accepted for the frame rate
pub const MAX_FPS: u32 = 1000;

/// Settings file picked up from the working directory when none is given
pub const DEFAULT_SETTINGS_PATH: &str = "shotstats.json";

/// Settings for one report run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Frames per second of the annotated film
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Report line syntax
    #[serde(default)]
    pub style: ReportStyle,

    /// Exclude the first and last record from location and category statistics
    #[serde(default = "default_true")]
    pub exclude_boundary_shots: bool,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            fps: DEFAULT_FPS,
            style: ReportStyle::default(),
            exclude_boundary_shots: true,
        }
    }
}

impl AnalysisSettings {
    /// Normalizes settings so every field is usable.
    ///
    /// This is intentionally tolerant: it corrects bad values instead of failing.
    pub fn normalize(&mut self) {
        self.version = SETTINGS_VERSION;

        if self.fps == 0 {
            warn!("Frame rate of 0 is not usable, defaulting to {}", DEFAULT_FPS);
            self.fps = DEFAULT_FPS;
        }
        self.fps = self.fps.min(MAX_FPS);
    }

    /// Parses settings from JSON content
    pub fn from_json(content: &str) -> CoreResult<Self> {
        let mut settings: AnalysisSettings = serde_json::from_str(content)?;

        if settings.version > SETTINGS_VERSION {
            return Err(CoreError::ValidationError(format!(
                "settings version {} is newer than supported version {}",
                settings.version, SETTINGS_VERSION
            )));
        }

        settings.normalize();
        Ok(settings)
    }

    /// Loads settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CoreError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;
        info!("Loaded settings from {}", path.display());

        Ok(settings)
    }

    /// Loads settings if the file exists, otherwise returns defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Settings file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load(path)
    }
}
