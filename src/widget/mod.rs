//! The countdown widget: a bubbletea-rs model wiring the engine, the input
//! resolver and the presentation flags to keyboard intents and a view.
//!
//! # Embedding
//!
//! ```rust
//! use countdown_widget::audio::Silent;
//! use countdown_widget::fullscreen::Headless;
//! use countdown_widget::input::DurationField;
//! use countdown_widget::widget::Model;
//!
//! let mut widget = Model::new(Box::new(Silent), Box::new(Headless::new()));
//! widget.set_duration_field(DurationField::Seconds, "5");
//! let _cadence = widget.start().expect("valid duration starts");
//! assert!(widget.state().running);
//! ```
//!
//! # Standalone program
//!
//! The `countdown` binary calls [`configure`] with its settings and then runs
//! `bubbletea_rs::Program::<Model>`; [`BubbleTeaModel::init`] picks the
//! configuration up from there.

mod keys;
mod style;
mod view;

pub use keys::CountdownKeyMap;
pub use style::Styles;

use crate::audio::AudioPlayer;
use crate::config::Settings;
use crate::fullscreen::{AlternateScreen, Fullscreen, FullscreenChangeMsg};
use crate::input::{DurationField, DurationInput, InputSpec, Mode, TargetDateInput};
use crate::presentation::Presentation;
use crate::timer::{self, CountdownState, Phase, TickMsg};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use chrono::Local;
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Everything the standalone program decides before the widget exists.
#[derive(Debug, Clone, Default)]
pub struct Launch {
    pub settings: Settings,
    /// Input to prefill.
    pub preset: Option<InputSpec>,
    /// Start the preset right away.
    pub autostart: bool,
}

static LAUNCH: OnceCell<Launch> = OnceCell::new();

/// Stores the launch configuration used by [`BubbleTeaModel::init`].
///
/// Only the first call has an effect; returns whether it was this one.
pub fn configure(launch: Launch) -> bool {
    LAUNCH.set(launch).is_ok()
}

/// Message prefix for a rejected fullscreen request.
pub const FULLSCREEN_ERROR_PREFIX: &str = "Error attempting to enable fullscreen mode";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Countdown widget state. Each instance owns its own countdown.
#[derive(Debug)]
pub struct Model {
    pub keymap: CountdownKeyMap,
    pub styles: Styles,
    /// Mode the widget opens in.
    pub default_mode: Mode,

    engine: timer::Model,
    mode: Mode,
    fields: [String; 4],
    focus: DurationField,
    date_text: String,
    fullscreen: Box<dyn Fullscreen>,
    fullscreen_active: bool,
    notification: Option<String>,
    width: usize,
    height: usize,
}

impl Model {
    /// A widget with a one second cadence.
    pub fn new(audio: Box<dyn AudioPlayer>, fullscreen: Box<dyn Fullscreen>) -> Self {
        Self::with_interval(audio, fullscreen, timer::DEFAULT_INTERVAL)
    }

    /// A widget whose cadence period is `interval` instead of one second.
    pub fn with_interval(
        audio: Box<dyn AudioPlayer>,
        fullscreen: Box<dyn Fullscreen>,
        interval: Duration,
    ) -> Self {
        let fullscreen_active = fullscreen.is_active();
        Self {
            keymap: CountdownKeyMap::default(),
            styles: Styles::default(),
            default_mode: Mode::Input,
            engine: timer::new_with_interval(audio, interval),
            mode: Mode::Input,
            fields: Default::default(),
            focus: DurationField::Days,
            date_text: String::new(),
            fullscreen,
            fullscreen_active,
            notification: None,
            width: 0,
            height: 0,
        }
    }

    /// A widget for a real terminal, using the sound and cadence settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut model = Self::with_interval(
            settings.audio_player(),
            Box::new(AlternateScreen::new()),
            settings.interval(),
        );
        model.default_mode = settings.timer.default_mode;
        model.mode = settings.timer.default_mode;
        model
    }

    /// Builds the widget for `launch` and, when asked to, starts the preset.
    pub fn launch(launch: &Launch) -> (Self, Option<Cmd>) {
        let mut model = Self::from_settings(&launch.settings);
        let mut cmd = None;
        if let Some(preset) = &launch.preset {
            model.prefill(preset);
            if launch.autostart {
                cmd = model.start();
                if cmd.is_none() {
                    info!("preset did not resolve to a positive duration, not starting");
                }
            }
        }
        (model, cmd)
    }

    /// Snapshot of the engine's count and flags.
    pub fn state(&self) -> CountdownState {
        self.engine.state()
    }

    /// Lifecycle phase of the engine.
    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Active input mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Display flags derived from the current state.
    pub fn presentation(&self) -> Presentation {
        Presentation::derive(&self.engine.state(), self.fullscreen_active)
    }

    /// The pending notification, if any.
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Raw text of one duration field.
    pub fn duration_field(&self, field: DurationField) -> &str {
        &self.fields[field.index()]
    }

    /// The duration field that receives typed digits.
    pub fn focused_field(&self) -> DurationField {
        self.focus
    }

    /// Raw text of the target date field.
    pub fn target_date_text(&self) -> &str {
        &self.date_text
    }

    /// Switches between duration and date input. Only allowed while idle.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if !self.engine.idle() {
            return false;
        }
        if self.mode != mode {
            debug!(?mode, "input mode changed");
        }
        self.mode = mode;
        true
    }

    /// Replaces the text of a duration field. It is parsed on start.
    ///
    /// ```rust
    /// use countdown_widget::prelude::*;
    ///
    /// let mut widget = Countdown::new(Box::new(Silent), Box::new(Headless::new()));
    /// widget.set_duration_field(DurationField::Minutes, "2");
    /// widget.start();
    /// assert_eq!(widget.state().total_seconds_remaining, 120);
    /// ```
    pub fn set_duration_field(&mut self, field: DurationField, text: impl Into<String>) {
        self.fields[field.index()] = text.into();
    }

    /// Replaces the target date text, e.g. `2026-12-31 23:59`.
    pub fn set_target_date(&mut self, text: impl Into<String>) {
        self.date_text = text.into();
    }

    /// The input currently described by the active mode, if it parses.
    pub fn input_spec(&self) -> Option<InputSpec> {
        match self.mode {
            Mode::Input => {
                let [days, hours, minutes, seconds] = &self.fields;
                Some(InputSpec::Duration(DurationInput::from_fields(
                    days, hours, minutes, seconds,
                )))
            }
            Mode::Date => TargetDateInput::parse(&self.date_text).map(InputSpec::TargetDate),
        }
    }

    /// Resolves the current input and starts the countdown.
    ///
    /// Input that does not resolve to a positive number of seconds is
    /// ignored without any feedback, as is a start while not idle.
    pub fn start(&mut self) -> Option<Cmd> {
        if !self.engine.idle() {
            return None;
        }
        let seconds = self.input_spec()?.resolve(Local::now())?;
        let cmd = self.engine.start(seconds);
        self.sync_keymap();
        cmd
    }

    /// Pauses a running countdown or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Option<Cmd> {
        let cmd = self.engine.toggle_pause();
        self.sync_keymap();
        cmd
    }

    /// Stops the countdown, silences the alarm and clears the inputs.
    pub fn cancel(&mut self) {
        self.engine.cancel();
        self.fields = Default::default();
        self.date_text.clear();
        self.focus = DurationField::Days;
        self.sync_keymap();
    }

    /// Same as [`Model::cancel`]; offered as "set another timer" after the end.
    pub fn reset(&mut self) {
        self.cancel()
    }

    /// Enters or leaves fullscreen. A rejected request becomes a notification.
    pub fn toggle_fullscreen(&mut self) {
        if self.fullscreen_active {
            if let Err(e) = self.fullscreen.exit() {
                warn!(error = %e, "failed to leave fullscreen");
            }
        } else if let Err(e) = self.fullscreen.request() {
            warn!(error = %e, "fullscreen request rejected");
            self.notification = Some(format!("{}: {}", FULLSCREEN_ERROR_PREFIX, e));
        }
        self.fullscreen_active = self.fullscreen.is_active();
        self.sync_keymap();
    }

    /// Leaves fullscreen from outside the widget's own toggle and reports the
    /// change the way an external observer would.
    fn exit_fullscreen(&mut self) -> Option<Cmd> {
        if let Err(e) = self.fullscreen.exit() {
            warn!(error = %e, "failed to leave fullscreen");
        }
        let active = self.fullscreen.is_active();
        Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FullscreenChangeMsg { active }) as Msg
        }))
    }

    fn prefill(&mut self, preset: &InputSpec) {
        self.mode = preset.mode();
        match preset {
            InputSpec::Duration(d) => self.fields = d.to_fields(),
            InputSpec::TargetDate(t) => {
                self.date_text = t.target.format(DATE_INPUT_FORMAT).to_string();
            }
        }
    }

    /// Stops everything the widget owns before the program exits.
    fn teardown(&mut self) {
        self.engine.cancel();
        if let Err(e) = self.fullscreen.exit() {
            warn!(error = %e, "failed to leave fullscreen on exit");
        }
        self.fullscreen_active = false;
    }

    fn sync_keymap(&mut self) {
        let phase = self.engine.phase();
        self.keymap.sync(phase, self.fullscreen_active);
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        // A pending notification blocks input until acknowledged.
        if self.notification.take().is_some() {
            return None;
        }

        if self.keymap.force_quit.matches(key_msg) || self.keymap.quit.matches(key_msg) {
            self.teardown();
            return Some(bubbletea_rs::quit());
        }
        if self.keymap.exit_fullscreen.matches(key_msg) {
            return self.exit_fullscreen();
        }

        match self.engine.phase() {
            Phase::Idle => self.handle_editing_key(key_msg),
            Phase::Running | Phase::Paused => {
                if self.keymap.pause.matches(key_msg) {
                    return self.toggle_pause();
                } else if self.keymap.cancel.matches(key_msg) {
                    self.cancel();
                } else if self.keymap.fullscreen.matches(key_msg) {
                    self.toggle_fullscreen();
                }
                None
            }
            Phase::Ended => {
                if self.keymap.reset.matches(key_msg) {
                    self.reset();
                } else if self.keymap.fullscreen.matches(key_msg) {
                    self.toggle_fullscreen();
                }
                None
            }
        }
    }

    fn handle_editing_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.start.matches(key_msg) {
            return self.start();
        }
        if self.keymap.switch_mode.matches(key_msg) {
            self.set_mode(self.mode.toggled());
            return None;
        }
        if self.mode == Mode::Input {
            if self.keymap.next_field.matches(key_msg) {
                self.focus = self.focus.next();
                return None;
            }
            if self.keymap.prev_field.matches(key_msg) {
                self.focus = self.focus.prev();
                return None;
            }
        }
        if key_msg
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        let text = match self.mode {
            Mode::Input => &mut self.fields[self.focus.index()],
            Mode::Date => &mut self.date_text,
        };
        match key_msg.key {
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Delete => text.clear(),
            KeyCode::Char(c) if accepts(self.mode, c) => text.push(c),
            _ => {}
        }
        None
    }
}

/// Characters each mode's input field takes.
fn accepts(mode: Mode, c: char) -> bool {
    match mode {
        Mode::Input => c.is_ascii_digit(),
        Mode::Date => c.is_ascii_digit() || matches!(c, '-' | ':' | ' ' | 'T'),
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let launch = LAUNCH.get().cloned().unwrap_or_default();
        Self::launch(&launch)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            let cmd = self.engine.handle_tick(tick_msg);
            if self.engine.ended() {
                self.sync_keymap();
            }
            return cmd;
        }

        if let Some(change) = msg.downcast_ref::<FullscreenChangeMsg>() {
            self.fullscreen_active = change.active;
            self.sync_keymap();
            return None;
        }

        if let Some(size) = msg.downcast_ref::<bubbletea_rs::WindowSizeMsg>() {
            self.width = size.width as usize;
            self.height = size.height as usize;
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        None
    }

    fn view(&self) -> String {
        view::render(self)
    }
}
