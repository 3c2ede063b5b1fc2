//! Configuration file handling.
//!
//! Settings live in `<config_dir>/countdown/config.toml`. Every key is
//! optional; a missing file means all defaults.
//!
//! ```toml
//! [sound]
//! enabled = true
//! bell = true
//! tick_command = "paplay /usr/share/sounds/freedesktop/stereo/message.oga"
//! alarm_command = "paplay /usr/share/sounds/freedesktop/stereo/complete.oga"
//!
//! [timer]
//! interval_ms = 1000
//! default_mode = "input"
//! ```

use crate::audio::{AudioPlayer, Bell, CommandPlayer, Silent};
use crate::error::ConfigError;
use crate::input::Mode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound: SoundSettings,
    pub timer: TimerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// Master switch. When off nothing is played.
    pub enabled: bool,
    /// Ring the terminal bell when the countdown ends and no alarm command is set.
    pub bell: bool,
    /// Shell command run on every second that does not end the countdown.
    pub tick_command: Option<String>,
    /// Shell command run when the countdown ends. Killed on reset.
    pub alarm_command: Option<String>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
            tick_command: None,
            alarm_command: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Cadence period in milliseconds.
    pub interval_ms: u64,
    /// Mode shown when the widget opens.
    pub default_mode: Mode,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            default_mode: Mode::Input,
        }
    }
}

impl Settings {
    /// `<config_dir>/countdown/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("countdown").join("config.toml"))
    }

    /// Loads settings from `path`. A file that does not exist yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }

    /// Parses and validates settings text. `path` is only used in errors.
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        if settings.timer.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "timer.interval_ms must be greater than 0".to_string(),
            });
        }
        Ok(settings)
    }

    /// The cadence period.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.timer.interval_ms)
    }

    /// Builds the sound collaborator these settings describe.
    ///
    /// Configured commands take precedence over the bell.
    pub fn audio_player(&self) -> Box<dyn AudioPlayer> {
        let sound = &self.sound;
        if !sound.enabled {
            return Box::new(Silent);
        }
        if sound.tick_command.is_some() || sound.alarm_command.is_some() {
            return Box::new(CommandPlayer::new(
                sound.tick_command.clone(),
                sound.alarm_command.clone(),
            ));
        }
        if sound.bell {
            Box::new(Bell)
        } else {
            Box::new(Silent)
        }
    }
}
