//! Timer registry
//!
//! Owns the fixed set of timers for the lifetime of the process and routes
//! client actions and polls to them.

use std::time::Duration;

use eggtimer_types::{DurationConfig, EggSize, StatusSnapshot, TimerAction, TimerId};
use phf::phf_map;

use super::egg::EggTimer;
use super::error::TimerError;
use super::looping::LoopTimer;
use crate::audio::{PendingSounds, SoundResolver};
use crate::context::{ConfigError, DurationStore};

/// Length of one countdown tick
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Client-facing timer names
static TIMER_NAMES: phf::Map<&'static str, TimerId> = phf_map! {
    "small" => TimerId::Egg(EggSize::Small),
    "medium" => TimerId::Egg(EggSize::Medium),
    "large" => TimerId::Egg(EggSize::Large),
    "loop" => TimerId::Loop,
};

/// Every timer the appliance runs, plus the queue they report into
#[derive(Debug)]
pub struct TimerRegistry {
    eggs: [EggTimer; 3],
    looping: LoopTimer,
    sounds: PendingSounds,
    durations: DurationStore,
}

impl TimerRegistry {
    /// Build the registry with one-second ticks.
    ///
    /// Fails if `config` lacks an entry for any timer.
    pub fn new(config: DurationConfig, resolver: SoundResolver) -> Result<Self, ConfigError> {
        Self::with_tick(config, resolver, DEFAULT_TICK)
    }

    pub fn with_tick(
        config: DurationConfig,
        resolver: SoundResolver,
        tick: Duration,
    ) -> Result<Self, ConfigError> {
        let durations = DurationStore::new(config)?;
        let sounds = PendingSounds::new(resolver);

        let eggs = EggSize::ALL
            .map(|size| EggTimer::new(size, durations.clone(), sounds.clone(), tick));
        let looping = LoopTimer::new(durations.clone(), sounds.clone(), tick);

        tracing::info!(tick_ms = tick.as_millis() as u64, "Timer registry ready");
        Ok(Self {
            eggs,
            looping,
            sounds,
            durations,
        })
    }

    /// Look up a timer by its client-facing name
    pub fn lookup(name: &str) -> Option<TimerId> {
        TIMER_NAMES.get(name).copied()
    }

    pub fn egg(&self, size: EggSize) -> &EggTimer {
        &self.eggs[size.index()]
    }

    pub fn looping(&self) -> &LoopTimer {
        &self.looping
    }

    pub fn sounds(&self) -> &PendingSounds {
        &self.sounds
    }

    /// Run `action` on `timer`, returning the cue to play immediately
    pub fn dispatch(&self, timer: TimerId, action: TimerAction) -> Option<String> {
        match (timer, action) {
            (TimerId::Egg(size), TimerAction::Start) => self.egg(size).start(),
            (TimerId::Egg(size), TimerAction::Reset) => self.egg(size).reset(),
            (TimerId::Loop, TimerAction::Start) => self.looping.start(),
            (TimerId::Loop, TimerAction::Reset) => self.looping.reset(),
        }
    }

    /// `dispatch` by name. Unknown names change nothing and are reported.
    pub fn dispatch_named(
        &self,
        name: &str,
        action: TimerAction,
    ) -> Result<Option<String>, TimerError> {
        match Self::lookup(name) {
            Some(timer) => Ok(self.dispatch(timer, action)),
            None => {
                tracing::warn!(timer = name, ?action, "Ignoring action for unknown timer");
                Err(TimerError::UnknownTimer {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Read every timer and drain the pending sounds exactly once
    pub fn poll(&self) -> StatusSnapshot {
        let mut snapshot = StatusSnapshot::default();
        for timer in &self.eggs {
            *snapshot.egg_mut(timer.size()) = timer.status();
        }
        snapshot.set_loop(self.looping.status());
        snapshot.sounds = self.sounds.drain_all();
        snapshot
    }

    /// Durations document currently in force
    pub fn durations(&self) -> DurationConfig {
        self.durations.snapshot()
    }

    /// Swap in new durations. Running countdowns pick them up at their next
    /// reload point.
    pub fn apply_durations(&self, config: DurationConfig) -> Result<(), ConfigError> {
        self.durations.replace(config)?;
        tracing::info!("Duration settings updated");
        Ok(())
    }

    /// Cancel every running countdown without emitting cues
    pub fn stop_all(&self) {
        for timer in &self.eggs {
            timer.halt();
        }
        self.looping.halt();
    }
}
