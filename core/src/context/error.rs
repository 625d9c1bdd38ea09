//! Error types for context operations

use thiserror::Error;

/// Errors while loading, validating, or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duration config has no entry for timer '{name}'")]
    MissingEntry { name: &'static str },

    #[error("duration config gives timer '{name}' a main countdown of 0 seconds")]
    ZeroDuration { name: &'static str },

    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
