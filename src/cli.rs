//! Command line arguments for the `countdown` binary.

use crate::config::Settings;
use crate::error::InputError;
use crate::input::{parse_duration_spec, parse_target_date, DurationInput, InputSpec, TargetDateInput};
use chrono::{DateTime, Local};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "countdown")]
#[command(about = "A terminal countdown timer with pause, alarm and fullscreen mode")]
#[command(version)]
pub struct Cli {
    /// Prefill a duration, e.g. 25 (minutes), 90s, 1h30m, 2d4h
    #[arg(short, long, value_parser = parse_duration_spec, conflicts_with = "until")]
    pub duration: Option<DurationInput>,

    /// Prefill a target date, e.g. "2026-12-31 23:59"
    #[arg(short, long, value_parser = parse_until)]
    pub until: Option<DateTime<Local>>,

    /// Start the prefilled countdown immediately
    #[arg(short, long)]
    pub start: bool,

    /// Play no sounds at all
    #[arg(long)]
    pub no_sound: bool,

    /// Ring the terminal bell when the countdown ends, even if the config disables it
    #[arg(long, conflicts_with = "no_sound")]
    pub bell: bool,

    /// Shell command to run on every tick
    #[arg(long)]
    pub tick_command: Option<String>,

    /// Shell command to run when the countdown ends
    #[arg(long)]
    pub alarm_command: Option<String>,

    /// Cadence period in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,

    /// Config file [default: <config dir>/countdown/config.toml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file [default: <config dir>/countdown/countdown.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_until(text: &str) -> Result<DateTime<Local>, InputError> {
    parse_target_date(text).ok_or_else(|| InputError::InvalidDate(text.to_string()))
}

impl Cli {
    /// Config file to read: the explicit one, else the platform default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Settings::default_path)
    }

    /// Overrides file settings with anything given on the command line.
    pub fn apply(&self, settings: &mut Settings) {
        if self.no_sound {
            settings.sound.enabled = false;
        }
        if self.bell {
            settings.sound.bell = true;
        }
        if let Some(command) = &self.tick_command {
            settings.sound.tick_command = Some(command.clone());
        }
        if let Some(command) = &self.alarm_command {
            settings.sound.alarm_command = Some(command.clone());
        }
        if let Some(ms) = self.interval_ms {
            settings.timer.interval_ms = ms;
        }
    }

    /// The input to prefill the widget with, if any.
    pub fn preset(&self) -> Option<InputSpec> {
        if let Some(duration) = self.duration {
            return Some(InputSpec::Duration(duration));
        }
        self.until
            .map(|target| InputSpec::TargetDate(TargetDateInput::new(target)))
    }

    /// `debug` with `-v`, otherwise `info`.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
