//! Key bindings for the countdown widget.
//!
//! - **Editing**: `tab`/`shift+tab` move between fields, `m` switches between
//!   duration and date input, `enter` starts
//! - **Running**: `space`/`p` pause or resume, `c` cancel, `f` fullscreen
//! - **Ended**: `enter`/`r` set another timer
//! - **Anywhere**: `esc` leaves fullscreen, `q`/`ctrl+c` quit
//!
//! Bindings that make no sense in the current phase are disabled, so they
//! neither match nor show up in the help line.

use crate::key::{self, Binding};
use crate::timer::Phase;
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone)]
pub struct CountdownKeyMap {
    pub next_field: Binding,
    pub prev_field: Binding,
    pub switch_mode: Binding,
    pub start: Binding,
    pub pause: Binding,
    pub cancel: Binding,
    /// "Set another timer" once the countdown ended.
    pub reset: Binding,
    pub fullscreen: Binding,
    pub exit_fullscreen: Binding,
    pub quit: Binding,
    pub force_quit: Binding,
}

impl Default for CountdownKeyMap {
    fn default() -> Self {
        let mut keymap = Self {
            next_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", "next field"),
            prev_field: Binding::new(vec![KeyCode::BackTab]).with_help("shift+tab", "prev field"),
            switch_mode: Binding::new(vec![KeyCode::Char('m')]).with_help("m", "switch mode"),
            start: Binding::new(vec![KeyCode::Enter]).with_help("enter", "start"),
            pause: Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')])
                .with_help("space", "pause/resume"),
            cancel: Binding::new(vec![KeyCode::Char('c')]).with_help("c", "cancel"),
            reset: Binding::new(vec![KeyCode::Enter, KeyCode::Char('r')])
                .with_help("enter", "set another timer"),
            fullscreen: Binding::new(vec![KeyCode::Char('f')]).with_help("f", "fullscreen"),
            exit_fullscreen: Binding::new(vec![KeyCode::Esc]).with_help("esc", "exit fullscreen"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
                .with_help("ctrl+c", "force quit"),
        };
        keymap.sync(Phase::Idle, false);
        keymap
    }
}

impl CountdownKeyMap {
    /// Enables the bindings that apply to `phase`.
    pub fn sync(&mut self, phase: Phase, fullscreen: bool) {
        let idle = phase == Phase::Idle;
        let active = matches!(phase, Phase::Running | Phase::Paused);
        let ended = phase == Phase::Ended;

        self.next_field.set_enabled(idle);
        self.prev_field.set_enabled(idle);
        self.switch_mode.set_enabled(idle);
        self.start.set_enabled(idle);
        self.pause.set_enabled(active);
        self.cancel.set_enabled(active);
        self.reset.set_enabled(ended);
        self.fullscreen.set_enabled(active || ended);
        self.exit_fullscreen.set_enabled(fullscreen);
        self.quit.set_enabled(true);
        self.force_quit.set_enabled(true);

        self.pause.description = if phase == Phase::Paused {
            "resume".to_string()
        } else {
            "pause".to_string()
        };
    }
}

impl key::KeyMap for CountdownKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        [
            &self.start,
            &self.switch_mode,
            &self.next_field,
            &self.pause,
            &self.cancel,
            &self.reset,
            &self.fullscreen,
            &self.exit_fullscreen,
            &self.quit,
        ]
        .into_iter()
        .filter(|b| b.enabled())
        .collect()
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.next_field,
                &self.prev_field,
                &self.switch_mode,
                &self.start,
            ],
            vec![&self.pause, &self.cancel, &self.reset],
            vec![
                &self.fullscreen,
                &self.exit_fullscreen,
                &self.quit,
                &self.force_quit,
            ],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyMap;

    fn labels(keymap: &CountdownKeyMap) -> Vec<&str> {
        keymap
            .short_help()
            .into_iter()
            .map(|b| b.description.as_str())
            .collect()
    }

    #[test]
    fn test_idle_help() {
        let keymap = CountdownKeyMap::default();
        assert_eq!(
            labels(&keymap),
            vec!["start", "switch mode", "next field", "quit"]
        );
    }

    #[test]
    fn test_running_and_paused_help() {
        let mut keymap = CountdownKeyMap::default();
        keymap.sync(Phase::Running, false);
        assert_eq!(labels(&keymap), vec!["pause", "cancel", "fullscreen", "quit"]);

        keymap.sync(Phase::Paused, true);
        assert_eq!(
            labels(&keymap),
            vec!["resume", "cancel", "fullscreen", "exit fullscreen", "quit"]
        );
    }

    #[test]
    fn test_ended_help() {
        let mut keymap = CountdownKeyMap::default();
        keymap.sync(Phase::Ended, false);
        assert_eq!(labels(&keymap), vec!["set another timer", "fullscreen", "quit"]);
    }

    #[test]
    fn test_full_help_has_every_binding() {
        let keymap = CountdownKeyMap::default();
        let count: usize = keymap.full_help().iter().map(Vec::len).sum();
        assert_eq!(count, 11);
    }
}
