//! Fullscreen presentation collaborators.
//!
//! In a terminal, "fullscreen" is the alternate screen: the countdown is
//! drawn on a clean screen and the shell's scrollback comes back when it is
//! left. The widget only cares that a request can fail, and that the state
//! can change underneath it; the latter is reported with
//! [`FullscreenChangeMsg`].

use crate::error::FullscreenError;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fmt;
use tracing::debug;

/// Notification that the fullscreen state changed outside the widget's own
/// toggle, for example because the user left it with `esc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullscreenChangeMsg {
    /// Whether fullscreen is active after the change.
    pub active: bool,
}

/// Platform fullscreen control.
pub trait Fullscreen: Send + fmt::Debug {
    /// Enters fullscreen. May be rejected by the platform.
    fn request(&mut self) -> Result<(), FullscreenError>;

    /// Leaves fullscreen. Leaving when not fullscreen is a no-op.
    fn exit(&mut self) -> Result<(), FullscreenError>;

    /// Whether fullscreen is currently active.
    fn is_active(&self) -> bool;
}

/// Switches the terminal to and from the alternate screen.
#[derive(Debug, Default)]
pub struct AlternateScreen {
    active: bool,
}

impl AlternateScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fullscreen for AlternateScreen {
    fn request(&mut self) -> Result<(), FullscreenError> {
        if self.active {
            return Ok(());
        }
        execute!(std::io::stdout(), EnterAlternateScreen).map_err(FullscreenError::Terminal)?;
        self.active = true;
        debug!("entered alternate screen");
        Ok(())
    }

    fn exit(&mut self) -> Result<(), FullscreenError> {
        if !self.active {
            return Ok(());
        }
        execute!(std::io::stdout(), LeaveAlternateScreen).map_err(FullscreenError::Terminal)?;
        self.active = false;
        debug!("left alternate screen");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for AlternateScreen {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// In-memory fullscreen state for embedding without a terminal.
///
/// With `unsupported` set every request is rejected, which is how a host
/// that cannot present fullscreen should behave.
#[derive(Debug, Default, Clone)]
pub struct Headless {
    active: bool,
    unsupported: Option<String>,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collaborator that rejects every request with `reason`.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self {
            active: false,
            unsupported: Some(reason.into()),
        }
    }
}

impl Fullscreen for Headless {
    fn request(&mut self) -> Result<(), FullscreenError> {
        if let Some(reason) = &self.unsupported {
            return Err(FullscreenError::Unsupported(reason.clone()));
        }
        self.active = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), FullscreenError> {
        self.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_toggles() {
        let mut fs = Headless::new();
        assert!(!fs.is_active());
        fs.request().expect("request");
        assert!(fs.is_active());
        fs.exit().expect("exit");
        assert!(!fs.is_active());
        fs.exit().expect("exit twice");
        assert!(!fs.is_active());
    }

    #[test]
    fn test_unsupported_rejects_request() {
        let mut fs = Headless::unsupported("no display");
        let err = fs.request().expect_err("should reject");
        assert_eq!(err.to_string(), "fullscreen is not supported: no display");
        assert!(!fs.is_active());
    }

    #[test]
    fn test_alternate_screen_exit_when_inactive_is_noop() {
        let mut fs = AlternateScreen::new();
        assert!(fs.exit().is_ok());
        assert!(!fs.is_active());
    }
}
