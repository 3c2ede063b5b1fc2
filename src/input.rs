//! Mode/input resolution: turns what the user typed into a remaining-seconds count.
//!
//! The widget accepts either a duration split over four fields or a target
//! date. Both resolve to a single positive number of seconds; anything that
//! resolves to zero or less yields `None` and the countdown is simply not
//! started.
//!
//! ```rust
//! use countdown_widget::input::{DurationInput, InputSpec};
//! use chrono::Local;
//!
//! let spec = InputSpec::Duration(DurationInput::from_fields("0", "1", "30", ""));
//! assert_eq!(spec.resolve(Local::now()), Some(5_400));
//!
//! let empty = InputSpec::Duration(DurationInput::default());
//! assert_eq!(empty.resolve(Local::now()), None);
//! ```

use crate::breakdown::{SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};
use crate::error::InputError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Deserialize;

/// Which input variant the widget is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Days/hours/minutes/seconds fields.
    #[default]
    Input,
    /// A target date and time.
    Date,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Input => Mode::Date,
            Mode::Date => Mode::Input,
        }
    }

    /// Tab label shown by the widget.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Input => "Input Time",
            Mode::Date => "Set Date",
        }
    }
}

/// One of the four duration input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationField {
    #[default]
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationField {
    /// All fields, largest unit first.
    pub const ALL: [DurationField; 4] = [
        DurationField::Days,
        DurationField::Hours,
        DurationField::Minutes,
        DurationField::Seconds,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The next field, wrapping from seconds to days.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous field, wrapping from days to seconds.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationField::Days => "Days",
            DurationField::Hours => "Hours",
            DurationField::Minutes => "Minutes",
            DurationField::Seconds => "Seconds",
        }
    }
}

/// A duration entered as separate fields. Missing fields are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationInput {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationInput {
    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Builds an input from raw field text, treating anything non-numeric as 0.
    pub fn from_fields(days: &str, hours: &str, minutes: &str, seconds: &str) -> Self {
        Self::new(
            parse_field(days),
            parse_field(hours),
            parse_field(minutes),
            parse_field(seconds),
        )
    }

    /// `days*86400 + hours*3600 + minutes*60 + seconds`, saturating on overflow.
    pub fn total_seconds(&self) -> u64 {
        self.days
            .saturating_mul(SECS_PER_DAY)
            .saturating_add(self.hours.saturating_mul(SECS_PER_HOUR))
            .saturating_add(self.minutes.saturating_mul(SECS_PER_MINUTE))
            .saturating_add(self.seconds)
    }

    /// The fields as display text, empty where the value is zero.
    pub fn to_fields(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds]
            .map(|v| if v == 0 { String::new() } else { v.to_string() })
    }
}

/// A countdown towards a point in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDateInput {
    pub target: DateTime<Local>,
}

impl TargetDateInput {
    pub fn new(target: DateTime<Local>) -> Self {
        Self { target }
    }

    /// Parses local date text, see [`parse_target_date`].
    pub fn parse(text: &str) -> Option<Self> {
        parse_target_date(text).map(Self::new)
    }

    /// Whole seconds from `now` to the target, floored. `None` when the
    /// target is not at least a full second away.
    pub fn seconds_from(&self, now: DateTime<Local>) -> Option<u64> {
        let millis = (self.target - now).num_milliseconds();
        if millis <= 0 {
            return None;
        }
        let secs = (millis / 1000) as u64;
        (secs > 0).then_some(secs)
    }
}

/// The two ways of describing a countdown. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSpec {
    Duration(DurationInput),
    TargetDate(TargetDateInput),
}

impl InputSpec {
    /// The mode that collects this variant.
    pub fn mode(&self) -> Mode {
        match self {
            InputSpec::Duration(_) => Mode::Input,
            InputSpec::TargetDate(_) => Mode::Date,
        }
    }

    /// Resolves to the initial remaining seconds, or `None` when the
    /// countdown should not start.
    pub fn resolve(&self, now: DateTime<Local>) -> Option<u64> {
        match self {
            InputSpec::Duration(d) => {
                let total = d.total_seconds();
                (total > 0).then_some(total)
            }
            InputSpec::TargetDate(t) => t.seconds_from(now),
        }
    }
}

/// Reads a numeric form field the way a lenient integer parse would:
/// leading whitespace is skipped and leading digits are used, anything else
/// (empty, negative, non-numeric) is 0.
pub fn parse_field(text: &str) -> u64 {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    // Longer than u64 can hold: clamp rather than discard.
    digits.parse().unwrap_or(u64::MAX)
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated form, or a bare
/// `YYYY-MM-DD` (local midnight).
///
/// Times that do not exist locally (skipped by a DST change) yield `None`;
/// ambiguous ones resolve to the earlier instant.
pub fn parse_target_date(text: &str) -> Option<DateTime<Local>> {
    let text = text.trim();
    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

/// Parses compact duration text such as `90s`, `1h30m` or `2d4h15m10s`.
///
/// A bare number is read as minutes. Units are `d`, `h`, `m` and `s`; any
/// subset may be given, each at most once and in that order.
pub fn parse_duration_spec(text: &str) -> Result<DurationInput, InputError> {
    let input = text.trim().to_lowercase();
    let invalid = || InputError::InvalidDuration(text.to_string());

    if input.is_empty() {
        return Err(invalid());
    }

    let mut duration = DurationInput::default();

    if input.chars().all(|c| c.is_ascii_digit()) {
        duration.minutes = input.parse().map_err(|_| invalid())?;
    } else {
        let mut number = String::new();
        // Units already consumed; the next one must come later in `dhms`.
        let mut seen = 0;
        for ch in input.chars() {
            if ch.is_ascii_digit() {
                number.push(ch);
                continue;
            }
            if ch.is_whitespace() {
                continue;
            }
            if number.is_empty() {
                return Err(invalid());
            }
            let value: u64 = number.parse().map_err(|_| invalid())?;
            let (rank, slot) = match ch {
                'd' => (1, &mut duration.days),
                'h' => (2, &mut duration.hours),
                'm' => (3, &mut duration.minutes),
                's' => (4, &mut duration.seconds),
                _ => return Err(invalid()),
            };
            if rank <= seen {
                return Err(invalid());
            }
            seen = rank;
            *slot = value;
            number.clear();
        }
        if !number.is_empty() {
            return Err(invalid());
        }
    }

    if duration.total_seconds() == 0 {
        return Err(InputError::ZeroDuration);
    }
    Ok(duration)
}
