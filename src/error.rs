//! Error types for the countdown widget and its collaborators.
//!
//! None of the countdown logic itself can fail. Errors only come from the
//! platform collaborators (sound, fullscreen) and from loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Errors reported by an [`AudioPlayer`](crate::audio::AudioPlayer).
///
/// The engine never propagates these; a sound that cannot be played is
/// logged and skipped.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to spawn sound command `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write terminal bell")]
    Bell(#[source] std::io::Error),
}

/// Errors reported by a [`Fullscreen`](crate::fullscreen::Fullscreen) collaborator.
#[derive(Debug, Error)]
pub enum FullscreenError {
    #[error("{0}")]
    Terminal(#[source] std::io::Error),

    #[error("fullscreen is not supported: {0}")]
    Unsupported(String),
}

/// Errors parsing duration or date text given on the command line.
///
/// The interactive widget never surfaces these: input it cannot resolve
/// simply does not start the countdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid duration `{0}`, use forms like 25, 90s, 1h30m or 2d4h")]
    InvalidDuration(String),

    #[error("duration must be greater than 0")]
    ZeroDuration,

    #[error("invalid date `{0}`, use YYYY-MM-DD HH:MM[:SS]")]
    InvalidDate(String),
}
