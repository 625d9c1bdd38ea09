use eggtimer_core::{
    AppConfig, AppConfigExt, ConfigError, SoundResolver, SoundsDirectory, TimerRegistry,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the timer registry.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub timers: Arc<TimerRegistry>,
    pub sounds: SoundsDirectory,
}

impl CliContext {
    /// Load the persisted configuration and build the timers from it.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(AppConfig::load())
    }

    /// Fails if the duration settings lack an entry for any timer.
    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        let sounds = SoundsDirectory::new(config.sound_roots());
        let timers = TimerRegistry::with_tick(
            config.durations.clone(),
            SoundResolver::new(sounds.clone()),
            config.tick_interval(),
        )?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            timers: Arc::new(timers),
            sounds,
        })
    }
}
