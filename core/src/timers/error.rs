//! Error types for timer dispatch

use thiserror::Error;

/// Errors while routing a client action to a timer
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("unknown timer '{name}'")]
    UnknownTimer { name: String },
}
