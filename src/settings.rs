//! Game settings and preferences
//!
//! Read from a JSON file at startup. Missing or broken files fall back to
//! defaults; unknown or absent fields take their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::FeedbackConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on impacts
    pub screen_shake: bool,
    /// Particle effects (bursts on hits, pickups, dashes)
    pub particles: bool,
    /// Live particle cap; oldest are evicted first
    pub max_particles: usize,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Storage ===
    pub high_score_path: PathBuf,

    // === Simulation ===
    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            max_particles: 1024,
            reduced_motion: false,
            high_score_path: PathBuf::from("highscore.json"),
            seed: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// Feedback limits handed to the simulation
    pub fn feedback(&self) -> FeedbackConfig {
        FeedbackConfig {
            screen_shake: self.effective_screen_shake(),
            max_particles: self.max_particles(),
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
