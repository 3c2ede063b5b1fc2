//! Type-safe key bindings.
//!
//! ```rust
//! use countdown_widget::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
//! let force = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
//!
//! let msg = KeyMsg { key: KeyCode::Char('q'), modifiers: KeyModifiers::NONE };
//! assert!(quit.matches(&msg));
//! assert!(!force.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A key code plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// A bare key matches only without ctrl/alt held; shift is ignored since
    /// it is already reflected in the character. A key with modifiers needs
    /// all of them.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if msg.key != self.code {
            return false;
        }
        if self.modifiers.is_empty() {
            !msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        } else {
            msg.modifiers.contains(self.modifiers)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub keys: Vec<KeyPress>,
    /// Key label for help text, e.g. `"space"`.
    pub help: String,
    /// What the key does, e.g. `"pause"`.
    pub description: String,
    enabled: bool,
}

impl Binding {
    /// A binding triggered by any of `keys`. Enabled, with no help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: String::new(),
            description: String::new(),
            enabled: true,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Disabled bindings neither match nor show in help.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether `msg` triggers this binding. Disabled bindings match nothing.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Collections of bindings that can describe themselves for help text.
pub trait KeyMap {
    /// Bindings for a one line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for an expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
