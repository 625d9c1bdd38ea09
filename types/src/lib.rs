//! Shared types for the egg timer
//!
//! This crate contains serializable types that are shared between the timer
//! engine (eggtimer-core) and its clients (eggtimer-cli).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Timer Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Egg size served by one countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EggSize {
    Small,
    Medium,
    Large,
}

impl EggSize {
    pub const ALL: [EggSize; 3] = [EggSize::Small, EggSize::Medium, EggSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            EggSize::Small => "small",
            EggSize::Medium => "medium",
            EggSize::Large => "large",
        }
    }

    /// Position in `ALL`, used for fixed-size per-size storage
    pub fn index(&self) -> usize {
        match self {
            EggSize::Small => 0,
            EggSize::Medium => 1,
            EggSize::Large => 2,
        }
    }
}

impl fmt::Display for EggSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of timers the appliance knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerId {
    Egg(EggSize),
    Loop,
}

impl TimerId {
    pub const ALL: [TimerId; 4] = [
        TimerId::Egg(EggSize::Small),
        TimerId::Egg(EggSize::Medium),
        TimerId::Egg(EggSize::Large),
        TimerId::Loop,
    ];

    /// Name used in configuration documents and client requests
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerId::Egg(size) => size.as_str(),
            TimerId::Loop => "loop",
        }
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client action on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    Start,
    Reset,
}

// ─────────────────────────────────────────────────────────────────────────────
// Durations
// ─────────────────────────────────────────────────────────────────────────────

/// Countdown lengths for one timer, in seconds.
///
/// `flip` is unused by the loop timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerDurations {
    pub main: u32,
    #[serde(default)]
    pub flip: u32,
}

impl TimerDurations {
    pub fn new(main: u32, flip: u32) -> Self {
        Self { main, flip }
    }
}

/// Duration settings keyed by timer name ("small", "medium", "large", "loop").
///
/// Kept as a plain name-keyed table so that the persisted document stays a
/// simple key-value file. Completeness is checked by the core when the
/// document is loaded into a duration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationConfig(pub BTreeMap<String, TimerDurations>);

impl DurationConfig {
    pub fn get(&self, timer: TimerId) -> Option<TimerDurations> {
        self.0.get(timer.as_str()).copied()
    }

    pub fn set(&mut self, timer: TimerId, durations: TimerDurations) {
        self.0.insert(timer.as_str().to_string(), durations);
    }

    /// Builder-style variant of `set`
    pub fn with(mut self, timer: TimerId, durations: TimerDurations) -> Self {
        self.set(timer, durations);
        self
    }
}

impl Default for DurationConfig {
    fn default() -> Self {
        DurationConfig(BTreeMap::new())
            .with(TimerId::Egg(EggSize::Small), TimerDurations::new(300, 30))
            .with(TimerId::Egg(EggSize::Medium), TimerDurations::new(360, 40))
            .with(TimerId::Egg(EggSize::Large), TimerDurations::new(420, 35))
            .with(TimerId::Loop, TimerDurations::new(180, 0))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status (client poll)
// ─────────────────────────────────────────────────────────────────────────────

/// Remaining times of one egg timer at the moment of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EggStatus {
    pub remain: u32,
    pub flip_remain: u32,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub flip_running: bool,
}

/// Loop timer state at the moment of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoopStatus {
    pub remain: u32,
    #[serde(default)]
    pub running: bool,
}

/// Result of one client poll: every timer's remaining times plus the cues
/// drained from the pending queue (each to be played exactly once).
///
/// The loop timer serializes as a bare `"loop": <seconds>` with its running
/// flag under `loop_running`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub small: EggStatus,
    pub medium: EggStatus,
    pub large: EggStatus,
    #[serde(rename = "loop")]
    pub loop_remain: u32,
    #[serde(default)]
    pub loop_running: bool,
    pub sounds: Vec<String>,
}

impl StatusSnapshot {
    pub fn egg(&self, size: EggSize) -> &EggStatus {
        match size {
            EggSize::Small => &self.small,
            EggSize::Medium => &self.medium,
            EggSize::Large => &self.large,
        }
    }

    pub fn set_loop(&mut self, status: LoopStatus) {
        self.loop_remain = status.remain;
        self.loop_running = status.running;
    }

    pub fn egg_mut(&mut self, size: EggSize) -> &mut EggStatus {
        match size {
            EggSize::Small => &mut self.small,
            EggSize::Medium => &mut self.medium,
            EggSize::Large => &mut self.large,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted appliance settings.
///
/// Note: Persistence methods (load/save) are provided by eggtimer-core via the
/// `AppConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bundled sound assets
    #[serde(default)]
    pub sounds_directory: String,

    /// User sound overrides, searched before the bundled directory
    #[serde(default)]
    pub user_sounds_directory: Option<String>,

    /// Length of one countdown tick in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    #[serde(default)]
    pub durations: DurationConfig,
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_sounds_directory(String::new())
    }
}

impl AppConfig {
    /// Create a new AppConfig with the specified sounds directory.
    /// Other fields use their default values.
    pub fn with_sounds_directory(sounds_directory: String) -> Self {
        Self {
            sounds_directory,
            user_sounds_directory: None,
            tick_millis: default_tick_millis(),
            durations: DurationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations_cover_every_timer() {
        let config = DurationConfig::default();
        for timer in TimerId::ALL {
            assert!(config.get(timer).is_some(), "missing {timer}");
        }
        assert_eq!(
            config.get(TimerId::Egg(EggSize::Medium)),
            Some(TimerDurations::new(360, 40))
        );
    }

    #[test]
    fn duration_config_serializes_as_name_table() {
        let config = DurationConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["small"]["main"], 300);
        assert_eq!(json["loop"]["flip"], 0);
    }

    #[test]
    fn flip_defaults_to_zero_when_omitted() {
        let config: DurationConfig = serde_json::from_str(r#"{"loop": {"main": 15}}"#).unwrap();
        assert_eq!(config.get(TimerId::Loop), Some(TimerDurations::new(15, 0)));
    }

    #[test]
    fn snapshot_reports_loop_as_seconds() {
        let mut snapshot = StatusSnapshot::default();
        snapshot.set_loop(LoopStatus {
            remain: 42,
            running: true,
        });
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["loop"], 42);
        assert_eq!(json["loop_running"], true);
        assert_eq!(json["small"]["flip_remain"], 0);
        assert!(json.get("loop_remain").is_none());
    }
}
