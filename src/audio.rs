//! Sound playback collaborators for the countdown.
//!
//! The engine calls [`AudioPlayer::play_tick`] on every second that does not
//! finish the countdown, [`AudioPlayer::play_alarm`] once when it finishes,
//! and [`AudioPlayer::stop_alarm`] on cancel/reset. Playback is fire and
//! forget: an `Err` is logged by the caller and otherwise ignored.

use crate::error::AudioError;
use std::fmt;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use tracing::debug;

/// Plays the countdown's tick and alarm sounds.
pub trait AudioPlayer: Send + fmt::Debug {
    /// Short sound for a second elapsing.
    fn play_tick(&mut self) -> Result<(), AudioError>;

    /// Sound for the countdown reaching zero.
    fn play_alarm(&mut self) -> Result<(), AudioError>;

    /// Silences an alarm that is still playing. Must be safe to call when
    /// nothing is playing.
    fn stop_alarm(&mut self) -> Result<(), AudioError>;
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioPlayer for Silent {
    fn play_tick(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_alarm(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_alarm(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Rings the terminal bell when the countdown ends. Ticks are silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bell;

impl AudioPlayer for Bell {
    fn play_tick(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_alarm(&mut self) -> Result<(), AudioError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(AudioError::Bell)
    }

    fn stop_alarm(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Runs user supplied shell commands for each sound, e.g.
/// `paplay /usr/share/sounds/freedesktop/stereo/complete.oga`.
///
/// The alarm process is kept so that [`AudioPlayer::stop_alarm`] can kill it.
/// Tick processes are kept until they exit and are reaped on the next tick.
#[derive(Default)]
pub struct CommandPlayer {
    tick_command: Option<String>,
    alarm_command: Option<String>,
    alarm: Option<Child>,
    ticks: Vec<Child>,
}

impl CommandPlayer {
    /// Commands that are empty or start with `#` are ignored.
    pub fn new(tick_command: Option<String>, alarm_command: Option<String>) -> Self {
        Self {
            tick_command: tick_command.filter(|c| is_runnable(c)),
            alarm_command: alarm_command.filter(|c| is_runnable(c)),
            alarm: None,
            ticks: Vec::new(),
        }
    }

    /// Waits on tick processes that have exited and keeps the rest.
    fn reap_ticks(&mut self) {
        self.ticks.retain_mut(|child| match child.try_wait() {
            Ok(Some(_)) => false,
            Ok(None) => true,
            Err(e) => {
                debug!("dropping tick process after wait error: {}", e);
                false
            }
        });
    }

    fn spawn(command: &str) -> Result<Child, AudioError> {
        Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn {
                command: command.to_string(),
                source,
            })
    }
}

impl fmt::Debug for CommandPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPlayer")
            .field("tick_command", &self.tick_command)
            .field("alarm_command", &self.alarm_command)
            .field("alarm_playing", &self.alarm.is_some())
            .field("ticks_pending", &self.ticks.len())
            .finish()
    }
}

impl AudioPlayer for CommandPlayer {
    fn play_tick(&mut self) -> Result<(), AudioError> {
        self.reap_ticks();
        if let Some(command) = &self.tick_command {
            let child = Self::spawn(command)?;
            self.ticks.push(child);
        }
        Ok(())
    }

    fn play_alarm(&mut self) -> Result<(), AudioError> {
        self.stop_alarm()?;
        if let Some(command) = &self.alarm_command {
            self.alarm = Some(Self::spawn(command)?);
        }
        Ok(())
    }

    fn stop_alarm(&mut self) -> Result<(), AudioError> {
        if let Some(mut child) = self.alarm.take() {
            // Already exited is fine; reap it either way.
            if let Err(e) = child.kill() {
                debug!("alarm process already finished: {}", e);
            }
            let _ = child.wait();
        }
        Ok(())
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        let _ = self.stop_alarm();
        for mut child in self.ticks.drain(..) {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Empty commands and commands that are commented out with `#` are skipped.
fn is_runnable(command: &str) -> bool {
    let trimmed = command.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}
