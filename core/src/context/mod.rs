mod config;
mod durations;
mod error;

pub use config::{AppConfig, AppConfigExt, DurationConfig, TimerDurations};
pub use durations::DurationStore;
pub use error::ConfigError;
