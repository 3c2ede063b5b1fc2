//! File-only logging.
//!
//! The terminal belongs to the widget while it runs, so log lines never go to
//! stdout or stderr. They are appended to `--log-file`, or to
//! `<config_dir>/countdown/countdown.log`. `RUST_LOG` overrides the default
//! filter.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `<config_dir>/countdown/countdown.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("countdown").join("countdown.log"))
}

/// Filter used when `RUST_LOG` is unset: `level` for this crate, warnings
/// for dependencies.
pub fn default_directive(level: &str) -> String {
    format!("warn,countdown_widget={},countdown={}", level, level)
}

/// Installs the global subscriber writing to `path`.
///
/// Returns the path in use, or `None` when logging could not be set up; the
/// reason is printed to stderr before the UI takes over the terminal.
pub fn init(path: Option<&Path>, level: &str) -> Option<PathBuf> {
    let log_path = match path.map(Path::to_path_buf).or_else(default_log_path) {
        Some(p) => p,
        None => {
            eprintln!("No config directory found, logging disabled");
            return None;
        }
    };

    if let Some(parent) = log_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!(
                "Failed to create log directory {:?}: {}, logging disabled",
                parent, e
            );
            return None;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}, logging disabled", log_path, e);
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init()
    {
        eprintln!("Failed to install logger: {}", e);
        return None;
    }

    tracing::info!(log_file = ?log_path, level, "logging initialized");
    Some(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive("debug"),
            "warn,countdown_widget=debug,countdown=debug"
        );
    }

    #[test]
    fn test_default_directive_is_a_valid_filter() {
        assert!(EnvFilter::try_new(default_directive("info")).is_ok());
    }
}
