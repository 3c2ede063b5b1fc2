//! Rendering for the countdown widget.

use super::Model;
use crate::input::{DurationField, Mode};
use crate::key::KeyMap;
use crate::presentation::Presentation;
use crate::timer::Phase;
use lipgloss_extras::lipgloss;

const TITLE: &str = "Countdown Timer";
const ENDED_MESSAGE: &str = "Time's Up!";
const DATE_PLACEHOLDER: &str = "YYYY-MM-DD HH:MM";
const UNIT_LABELS: [&str; 4] = ["Days", "Hours", "Minutes", "Seconds"];
const UNIT_GAP: usize = 3;

pub(super) fn render(model: &Model) -> String {
    let presentation = model.presentation();
    let phase = model.phase();

    if presentation.fullscreen {
        return render_fullscreen(model, &presentation);
    }

    let mut sections: Vec<String> = vec![model.styles.title.render(TITLE)];

    if phase == Phase::Idle {
        sections.push(render_tabs(model));
        sections.push(match model.mode() {
            Mode::Input => render_duration_fields(model),
            Mode::Date => render_date_field(model),
        });
    }

    sections.push(render_countdown(model, &presentation));

    if phase == Phase::Paused {
        sections.push(model.styles.paused.render("Paused"));
    }
    if presentation.ended {
        sections.push(model.styles.end_message.render(ENDED_MESSAGE));
    }

    if let Some(notification) = model.notification() {
        sections.push(model.styles.notification.render(notification));
    }

    sections.push(render_help(model));
    sections.join("\n\n")
}

/// Only the countdown, centered when the terminal size is known.
fn render_fullscreen(model: &Model, presentation: &Presentation) -> String {
    let countdown = render_countdown(model, presentation);
    let mut block: Vec<String> = countdown.lines().map(str::to_string).collect();
    if let Some(notification) = model.notification() {
        block.push(String::new());
        block.push(model.styles.notification.render(notification));
    }

    let block_width = block
        .iter()
        .map(|line| lipgloss::width_visible(line))
        .max()
        .unwrap_or(0);
    let left = model.width.saturating_sub(block_width) / 2;
    let top = model.height.saturating_sub(block.len()) / 2;

    let mut out = "\n".repeat(top);
    let lines: Vec<String> = block
        .iter()
        .map(|line| format!("{}{}", " ".repeat(left), line))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

fn render_tabs(model: &Model) -> String {
    [Mode::Input, Mode::Date]
        .iter()
        .map(|&mode| {
            let style = if mode == model.mode() {
                &model.styles.tab_active
            } else {
                &model.styles.tab_inactive
            };
            style.render(mode.label())
        })
        .collect::<Vec<_>>()
        .join("   ")
}

fn render_duration_fields(model: &Model) -> String {
    DurationField::ALL
        .iter()
        .map(|&field| {
            let value = model.duration_field(field);
            let focused = field == model.focused_field();
            let shown = if value.is_empty() {
                model.styles.placeholder.render("--")
            } else if focused {
                model.styles.field_focused.render(value)
            } else {
                model.styles.field_blurred.render(value)
            };
            let cursor = if focused { "_" } else { " " };
            format!(
                "{} [{}{}]",
                model.styles.field_label.render(field.label()),
                shown,
                cursor
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_date_field(model: &Model) -> String {
    let text = model.target_date_text();
    let shown = if text.is_empty() {
        model.styles.placeholder.render(DATE_PLACEHOLDER)
    } else {
        model.styles.field_focused.render(text)
    };
    format!(
        "{} [{}_]",
        model.styles.field_label.render("Target"),
        shown
    )
}

/// Two lines: zero padded digits over their unit labels.
fn render_countdown(model: &Model, presentation: &Presentation) -> String {
    let digits_style = if presentation.ended {
        &model.styles.digits_ended
    } else if presentation.blink_on {
        &model.styles.digits_blink
    } else {
        &model.styles.digits
    };

    let padded = presentation.breakdown.padded();
    let mut digits_line = Vec::with_capacity(4);
    let mut labels_line = Vec::with_capacity(4);
    for (value, label) in padded.iter().zip(UNIT_LABELS) {
        let width = value.len().max(label.len());
        digits_line.push(digits_style.render(&center(value, width)));
        labels_line.push(model.styles.unit_label.render(&center(label, width)));
    }

    let gap = " ".repeat(UNIT_GAP);
    format!("{}\n{}", digits_line.join(&gap), labels_line.join(&gap))
}

fn render_help(model: &Model) -> String {
    let separator = model.styles.help_separator.render(" • ");
    model
        .keymap
        .short_help()
        .iter()
        .map(|binding| {
            format!(
                "{} {}",
                model.styles.help_key.render(&binding.help),
                model.styles.help_desc.render(&binding.description)
            )
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

fn center(text: &str, width: usize) -> String {
    format!("{:^width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::fullscreen::{FullscreenChangeMsg, Headless};
    use bubbletea_rs::Model as BubbleTeaModel;

    fn plain(s: &str) -> String {
        lipgloss::strip_ansi(s)
    }

    fn widget() -> Model {
        Model::new(Box::new(Silent), Box::new(Headless::new()))
    }

    /// The four numbers shown above the unit labels.
    fn countdown_digits(view: &str) -> Vec<String> {
        let lines: Vec<&str> = view.lines().collect();
        let labels = lines
            .iter()
            .position(|line| line.split_whitespace().eq(UNIT_LABELS))
            .expect("unit label line");
        lines[labels - 1]
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_idle_view_shows_inputs() {
        let mut model = widget();
        model.set_duration_field(DurationField::Minutes, "5");
        let view = plain(&model.view());
        assert!(view.contains(TITLE));
        assert!(view.contains("Input Time"));
        assert!(view.contains("Set Date"));
        assert!(view.contains("Minutes [5 ]"));
        assert!(view.contains("Days [--_]"));
        assert_eq!(countdown_digits(&view), ["00", "00", "00", "00"]);
        assert!(!view.contains(ENDED_MESSAGE));
    }

    #[test]
    fn test_date_mode_view() {
        let mut model = widget();
        model.set_mode(Mode::Date);
        let view = plain(&model.view());
        assert!(view.contains(DATE_PLACEHOLDER));
        assert!(!view.contains("Hours ["));
    }

    #[test]
    fn test_running_view_hides_inputs() {
        let mut model = widget();
        model.set_duration_field(DurationField::Hours, "26");
        model.start();
        let view = plain(&model.view());
        assert!(!view.contains("Input Time"));
        assert!(!view.contains("Hours ["));
        assert_eq!(countdown_digits(&view), ["01", "02", "00", "00"]);
        assert!(view.contains("pause"));
        assert!(view.contains("cancel"));
        assert!(view.contains("fullscreen"));
    }

    #[test]
    fn test_paused_view() {
        let mut model = widget();
        model.set_duration_field(DurationField::Seconds, "30");
        model.start();
        model.toggle_pause();
        let view = plain(&model.view());
        assert!(view.contains("Paused"));
        assert!(view.contains("resume"));
    }

    #[test]
    fn test_ended_view() {
        let mut model = widget();
        model.set_duration_field(DurationField::Seconds, "1");
        model.start();
        let msg = model.engine.live_tick();
        model.update(Box::new(msg));
        let view = plain(&model.view());
        assert!(view.contains(ENDED_MESSAGE));
        assert!(view.contains("set another timer"));
        assert_eq!(countdown_digits(&view), ["00", "00", "00", "00"]);
    }

    #[test]
    fn test_fullscreen_view_is_countdown_only() {
        let mut model = widget();
        model.set_duration_field(DurationField::Seconds, "42");
        model.start();
        model.toggle_fullscreen();
        let view = plain(&model.view());
        assert!(!view.contains(TITLE));
        assert!(!view.contains("cancel"));
        assert_eq!(countdown_digits(&view), ["00", "00", "00", "42"]);

        model.update(Box::new(FullscreenChangeMsg { active: false }));
        assert!(plain(&model.view()).contains(TITLE));
    }

    #[test]
    fn test_notification_is_rendered() {
        let mut model = Model::new(Box::new(Silent), Box::new(Headless::unsupported("nope")));
        model.set_duration_field(DurationField::Seconds, "42");
        model.start();
        model.toggle_fullscreen();
        let view = plain(&model.view());
        assert!(view.contains("Error attempting to enable fullscreen mode"));
    }

    #[test]
    fn test_center() {
        assert_eq!(center("05", 7), "  05   ");
        assert_eq!(center("Days", 4), "Days");
    }
}
