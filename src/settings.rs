//! Game tuning settings
//!
//! Loaded from JSON by hosts that want a non-standard pace. Missing fields
//! fall back to the defaults, which reproduce the classic game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::LOSS_THRESHOLD;
use crate::error::GameError;
use crate::sim::PacingConfig;

/// Shortest allowed reveal interval (ms)
pub const MIN_STEP_MS: f64 = 1.0;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reveal pacing curve
    pub pacing: PacingConfig,
    /// Unpressed lights that end the round
    pub loss_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            loss_threshold: LOSS_THRESHOLD,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let pacing = &self.pacing;
        if pacing.length == 0 {
            return Err(GameError::InvalidSettings(
                "pacing.length must be at least 1".into(),
            ));
        }
        if !(pacing.fastest_ms.is_finite() && pacing.fastest_ms >= MIN_STEP_MS) {
            return Err(GameError::InvalidSettings(format!(
                "pacing.fastest_ms must be at least {} ms, got {}",
                MIN_STEP_MS,
                pacing.fastest_ms
            )));
        }
        if !(pacing.slowest_ms.is_finite() && pacing.slowest_ms >= pacing.fastest_ms) {
            return Err(GameError::InvalidSettings(format!(
                "pacing.slowest_ms ({}) must not be below pacing.fastest_ms ({})",
                pacing.slowest_ms, pacing.fastest_ms
            )));
        }
        if self.loss_threshold == 0 {
            return Err(GameError::InvalidSettings(
                "loss_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
