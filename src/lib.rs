#![doc(html_root_url = "https://docs.rs/countdown-widget/")]

//! # countdown-widget
//!
//! A countdown timer for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications, plus a standalone `countdown` binary.
//!
//! ## Overview
//!
//! A countdown is described either as a duration (days, hours, minutes and
//! seconds) or as a target date in local time. Once started it ticks once per
//! second, can be paused, resumed, cancelled and reset, plays a tick sound on
//! every second and an alarm when it reaches zero. The last minute blinks, and
//! the countdown can take over the whole terminal.
//!
//! ## Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`timer`] | Countdown engine: phases, cadence, sound triggers |
//! | [`input`] | Turns duration fields or a target date into seconds |
//! | [`breakdown`] | Splits seconds into days, hours, minutes and seconds |
//! | [`presentation`] | Derived view flags (blinking, ended, fullscreen) |
//! | [`audio`] | Tick and alarm players |
//! | [`fullscreen`] | Alternate screen handling |
//! | [`widget`] | The bubbletea-rs model tying it all together |
//!
//! ## Using the engine directly
//!
//! ```rust
//! use countdown_widget::audio::Silent;
//! use countdown_widget::timer::{self, Phase, Signal};
//!
//! let mut countdown = timer::new(Box::new(Silent));
//! let _cadence = countdown.start(2);
//! assert_eq!(countdown.tick(), Some(Signal::Tick));
//! assert_eq!(countdown.tick(), Some(Signal::Completed));
//! assert_eq!(countdown.tick(), None);
//! assert_eq!(countdown.phase(), Phase::Ended);
//! ```
//!
//! ## Embedding the widget
//!
//! ```rust
//! use countdown_widget::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let countdown = Countdown::new(Box::new(Silent), Box::new(Headless::new()));
//!         (Self { countdown }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

pub mod audio;
pub mod breakdown;
pub mod cli;
pub mod config;
pub mod error;
pub mod fullscreen;
pub mod input;
pub mod key;
pub mod logging;
pub mod presentation;
pub mod timer;
pub mod widget;

pub use breakdown::TimeBreakdown;
pub use config::Settings;
pub use input::{DurationInput, InputSpec, Mode, TargetDateInput};
pub use presentation::Presentation;
pub use timer::{CountdownState, Phase};
pub use widget::Model as Countdown;

/// Prelude module for convenient imports.
///
/// ```rust
/// use countdown_widget::prelude::*;
///
/// let widget = Countdown::new(Box::new(Silent), Box::new(Headless::new()));
/// assert_eq!(widget.phase(), Phase::Idle);
/// ```
pub mod prelude {
    pub use crate::audio::{AudioPlayer, Bell, CommandPlayer, Silent};
    pub use crate::breakdown::TimeBreakdown;
    pub use crate::fullscreen::{AlternateScreen, Fullscreen, FullscreenChangeMsg, Headless};
    pub use crate::input::{DurationField, DurationInput, InputSpec, Mode, TargetDateInput};
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::presentation::Presentation;
    pub use crate::timer::{
        CompletedMsg as CountdownCompletedMsg, CountdownState, Phase, Signal,
        TickMsg as CountdownTickMsg,
    };
    pub use crate::widget::{CountdownKeyMap, Model as Countdown, Styles as CountdownStyles};
}
