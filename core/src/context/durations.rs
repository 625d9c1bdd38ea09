//! Runtime duration settings shared by every timer
//!
//! Timers read from the store only at their reload points (start, reset,
//! cycle completion). Client updates swap the whole document at once, so a
//! read never observes a half-applied change.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use eggtimer_types::{DurationConfig, EggSize, TimerDurations, TimerId};

use super::error::ConfigError;

/// Durations checked for completeness, indexed by timer
#[derive(Debug, Clone, Copy)]
struct ValidatedDurations {
    eggs: [TimerDurations; 3],
    loop_main: u32,
}

impl ValidatedDurations {
    fn from_config(config: &DurationConfig) -> Result<Self, ConfigError> {
        let mut eggs = [TimerDurations::default(); 3];
        for size in EggSize::ALL {
            eggs[size.index()] = require(config, TimerId::Egg(size))?;
        }
        let looping = require(config, TimerId::Loop)?;

        Ok(Self {
            eggs,
            loop_main: looping.main,
        })
    }
}

fn require(config: &DurationConfig, timer: TimerId) -> Result<TimerDurations, ConfigError> {
    let durations = config.get(timer).ok_or(ConfigError::MissingEntry {
        name: timer.as_str(),
    })?;
    if durations.main == 0 {
        return Err(ConfigError::ZeroDuration {
            name: timer.as_str(),
        });
    }
    Ok(durations)
}

#[derive(Debug)]
struct StoreInner {
    validated: ValidatedDurations,
    raw: DurationConfig,
}

/// Shared handle to the current duration settings.
///
/// Cloning is cheap; all clones observe the same document.
#[derive(Debug, Clone)]
pub struct DurationStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl DurationStore {
    /// Build a store from a config document.
    ///
    /// Fails if any timer lacks an entry or has a zero main countdown.
    pub fn new(config: DurationConfig) -> Result<Self, ConfigError> {
        let validated = ValidatedDurations::from_config(&config)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(StoreInner {
                validated,
                raw: config,
            })),
        })
    }

    /// Current main/flip lengths for an egg size
    pub fn egg(&self, size: EggSize) -> TimerDurations {
        self.read().validated.eggs[size.index()]
    }

    /// Current loop cycle length
    pub fn loop_main(&self) -> u32 {
        self.read().validated.loop_main
    }

    /// Copy of the document currently in force
    pub fn snapshot(&self) -> DurationConfig {
        self.read().raw.clone()
    }

    /// Swap in a new document. The old one stays in force if validation fails.
    pub fn replace(&self, config: DurationConfig) -> Result<(), ConfigError> {
        let validated = ValidatedDurations::from_config(&config)?;
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.validated = validated;
        guard.raw = config;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
