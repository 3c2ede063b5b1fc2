//! Styles for the countdown widget.
//!
//! All colors are adaptive so the widget reads well on light and dark
//! terminals. Override individual fields to theme it:
//!
//! ```rust
//! use countdown_widget::widget::Styles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = Styles::default();
//! styles.digits = Style::new().foreground(Color::from("#00FF00")).bold(true);
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

#[derive(Debug, Clone)]
pub struct Styles {
    pub title: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub field_label: Style,
    pub field_focused: Style,
    pub field_blurred: Style,
    pub placeholder: Style,
    /// Countdown digits in the normal state.
    pub digits: Style,
    /// Countdown digits on the highlighted half of a blink.
    pub digits_blink: Style,
    /// Countdown digits once time is up.
    pub digits_ended: Style,
    pub unit_label: Style,
    pub end_message: Style,
    pub paused: Style,
    pub notification: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub help_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let accent = AdaptiveColor {
            Light: "#7D56F4",
            Dark: "#AD8CFF",
        };
        let alert = AdaptiveColor {
            Light: "#D7263D",
            Dark: "#FF5F87",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .bold(true)
                .padding(0, 1, 0, 1),
            tab_active: Style::new().foreground(accent.clone()).bold(true).underline(true),
            tab_inactive: Style::new().foreground(subdued.clone()),
            field_label: Style::new().foreground(subdued.clone()),
            field_focused: Style::new().foreground(accent.clone()).bold(true),
            field_blurred: Style::new().foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#DDDDDD",
            }),
            placeholder: Style::new().foreground(subdued.clone()).faint(true),
            digits: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1A1A1A",
                    Dark: "#FFFFFF",
                })
                .bold(true),
            digits_blink: Style::new().foreground(alert.clone()).bold(true),
            digits_ended: Style::new().foreground(alert.clone()).bold(true),
            unit_label: Style::new().foreground(subdued.clone()),
            end_message: Style::new().foreground(alert.clone()).bold(true),
            paused: Style::new().foreground(accent).italic(true),
            notification: Style::new()
                .background(Color::from("#D7263D"))
                .foreground(Color::from("#FFFFFF"))
                .padding(0, 1, 0, 1),
            help_key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            help_desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            help_separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}
