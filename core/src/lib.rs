pub mod audio;
pub mod context;
pub mod timers;

// Re-exports for convenience
pub use audio::{AssetStore, Cue, PendingSounds, SoundResolver, SoundsDirectory, StaticAssets};
pub use context::{AppConfig, AppConfigExt, ConfigError, DurationConfig, DurationStore, TimerDurations};
pub use eggtimer_types::{EggSize, EggStatus, LoopStatus, StatusSnapshot, TimerAction, TimerId};
pub use timers::{EggTimer, LoopTimer, TimerError, TimerRegistry};
