//! Game settings and preferences
//!
//! Read from an optional JSON file by the host. Missing fields fall back to
//! the defaults, so a settings file only needs the values it changes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, MAX_SUBSTEPS, SIM_DT};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena width in pixels
    pub arena_width: f32,
    /// Arena height in pixels
    pub arena_height: f32,

    // === Simulation ===
    /// Session seed; a random one is picked when unset
    pub seed: Option<u64>,
    /// Fixed simulation rate
    pub tick_rate_hz: f32,
    /// Maximum substeps per frame
    pub max_substeps: u32,

    // === Visual Effects ===
    /// Screen shake on player hits
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Headless host ===
    /// Simulated seconds before the host stops a session
    pub session_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            seed: None,
            tick_rate_hz: 1.0 / SIM_DT,
            max_substeps: MAX_SUBSTEPS,

            screen_shake: true,
            reduced_motion: false,

            session_seconds: 120.0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed reading settings {}", path.display()))?;
        let settings: Self = serde_json::from_str(&json)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            bail!(
                "arena size must be positive, got {}x{}",
                self.arena_width,
                self.arena_height
            );
        }
        if !(self.tick_rate_hz > 0.0 && self.tick_rate_hz.is_finite()) {
            bail!("tick rate must be positive, got {}", self.tick_rate_hz);
        }
        if self.max_substeps == 0 {
            bail!("max substeps must be at least 1");
        }
        if self.session_seconds < 0.0 {
            bail!("session length must not be negative, got {}", self.session_seconds);
        }
        Ok(())
    }

    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Length of one simulation step in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena(), Vec2::new(800.0, 600.0));
        assert!((settings.tick_dt() - SIM_DT).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 42, "reduced_motion": true}"#)
            .expect("valid settings json");
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_arena = Settings {
            arena_width: 0.0,
            ..Settings::default()
        };
        assert!(bad_arena.validate().is_err());

        let bad_rate = Settings {
            tick_rate_hz: -60.0,
            ..Settings::default()
        };
        assert!(bad_rate.validate().is_err());

        let bad_substeps = Settings {
            max_substeps: 0,
            ..Settings::default()
        };
        assert!(bad_substeps.validate().is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let path = std::env::temp_dir().join("asteroid_dodger_missing_settings.json");
        let _ = fs::remove_file(&path);
        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("asteroid_dodger_missing_settings.json"));
    }

    #[test]
    fn test_load_round_trip_file() {
        let path = std::env::temp_dir().join("asteroid_dodger_settings_test.json");
        fs::write(&path, r#"{"arena_width": 1024.0, "session_seconds": 30.0}"#)
            .expect("write temp settings");
        let settings = Settings::load(&path).expect("load settings");
        assert_eq!(settings.arena(), Vec2::new(1024.0, 600.0));
        assert_eq!(settings.session_seconds, 30.0);
        let _ = fs::remove_file(&path);

        let settings = Settings::load_or_default(None).expect("defaults");
        assert_eq!(settings, Settings::default());
    }
}
