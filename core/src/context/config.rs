//! Application configuration
//!
//! This module re-exports shared types from eggtimer-types and provides
//! platform-specific defaults and persistence for AppConfig.

use std::path::PathBuf;
use std::time::Duration;

pub use eggtimer_types::{AppConfig, DurationConfig, TimerDurations};

use super::error::ConfigError;

const APP_NAME: &str = "eggtimer";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_sounds_directory() -> String {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME).join("sounds"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "static".to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn try_load() -> Result<Self, ConfigError>;
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    /// Sound directories in lookup order (user overrides first)
    fn sound_roots(&self) -> Vec<PathBuf>;
    fn tick_interval(&self) -> Duration;
}

impl AppConfigExt for AppConfig {
    fn try_load() -> Result<Self, ConfigError> {
        let mut config: AppConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        if config.sounds_directory.is_empty() {
            config.sounds_directory = default_sounds_directory();
        }
        Ok(config)
    }

    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            Self::load_with_defaults()
        })
    }

    /// Load with platform-specific defaults (used when no config file exists)
    fn load_with_defaults() -> Self {
        AppConfig::with_sounds_directory(default_sounds_directory())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn sound_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::with_capacity(2);
        if let Some(user) = self.user_sounds_directory.as_deref().filter(|d| !d.is_empty()) {
            roots.push(PathBuf::from(user));
        }
        roots.push(PathBuf::from(&self.sounds_directory));
        roots
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}
