//! Game settings and preferences
//!
//! Stored as JSON next to the high score record. Every field has a default,
//! so partial or older files still load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Ball trail particles spawned per frame (1.0 = every frame)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (shatter, chips, pickups)
    pub particles: bool,
    /// Ball trails
    pub trails: bool,

    // === HUD ===
    /// Show the frame rate in the HUD
    pub show_fps: bool,

    // === Persistence ===
    /// Where the high score record lives
    pub high_score_path: PathBuf,

    /// Fixed run seed; a fresh one is drawn per run when unset
    pub seed: Option<u64>,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            trails: true,
            show_fps: false,
            high_score_path: PathBuf::from("highscore.txt"),
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail density (0 when trails are off)
    pub fn trail_density(&self) -> f32 {
        if self.trails && self.particles {
            self.quality.trail_quality()
        } else {
            0.0
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, PersistError> {
        let json = std::fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| PersistError::parse(path, e))
    }

    /// Save settings to `path` as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| PersistError::io(path, e))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
