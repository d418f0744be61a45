//! Error types.
//!
//! Playground operations themselves never fail; these cover the edges around
//! them: routing events to controls, loading configuration, terminal I/O and
//! layout computation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the playground operations.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// An event named a control that the controller does not own.
    #[error("unknown control `{0}`")]
    UnknownControl(String),

    /// The configuration file could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration string could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    /// A configuration value is outside its accepted range.
    #[error("invalid configuration value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}

/// Result alias for fallible playground APIs.
pub type Result<T> = std::result::Result<T, PlaygroundError>;
