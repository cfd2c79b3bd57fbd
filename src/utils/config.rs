//! Configuration management for framestep
//!
//! This module handles loading and managing application configuration
//! from the user config file and environment variables.

use crate::utils::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window configuration
    pub window: WindowConfig,

    /// Overlay configuration
    pub overlay: OverlayConfig,

    /// Playback configuration
    pub playback: PlaybackConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
}

/// Position overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Font scale for the position label
    pub font_scale: f64,

    /// Stroke thickness for the position label
    pub thickness: i32,

    /// Label color (hex, e.g. "#00FF00")
    pub color: String,
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Frame rate assumed when the source metadata reports none,
    /// used only to pace the playing-state key wait
    pub fallback_fps: f64,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "framestep".to_string(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            thickness: 2,
            color: "#00FF00".to_string(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { fallback_fps: 30.0 }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the standard sources
    ///
    /// Configuration is loaded in the following order (later sources
    /// override earlier):
    /// 1. Default values
    /// 2. User config file (~/.config/framestep/config.toml on Linux)
    /// 3. Environment variables (FRAMESTEP_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config.merge_from_file(&user_path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit file, still honoring
    /// environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge configuration from a TOML file
    fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PlayerError::Config(format!("Failed to read config file: {}", e)))?;

        let file_config: Config = toml::from_str(&contents)
            .map_err(|e| PlayerError::Config(format!("Failed to parse config file: {}", e)))?;

        *self = file_config;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(title) = std::env::var("FRAMESTEP_WINDOW_TITLE") {
            self.window.title = title;
        }

        if let Ok(fps) = std::env::var("FRAMESTEP_FALLBACK_FPS") {
            self.playback.fallback_fps = fps
                .parse()
                .map_err(|_| PlayerError::Config("Invalid FRAMESTEP_FALLBACK_FPS".to_string()))?;
        }

        if let Ok(log_level) = std::env::var("FRAMESTEP_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.playback.fallback_fps <= 0.0 {
            return Err(PlayerError::Config(
                "Fallback fps must be positive".to_string(),
            ));
        }

        if self.overlay.font_scale <= 0.0 {
            return Err(PlayerError::Config(
                "Overlay font scale must be positive".to_string(),
            ));
        }

        if self.overlay.thickness < 1 {
            return Err(PlayerError::Config(
                "Overlay thickness must be at least 1".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(PlayerError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("framestep").join("config.toml"))
    }
}
