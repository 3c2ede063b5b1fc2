//! Days/hours/minutes/seconds decomposition of a remaining-seconds value.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::breakdown::TimeBreakdown;
//!
//! let b = TimeBreakdown::from_seconds(90_061);
//! assert_eq!((b.days, b.hours, b.minutes, b.seconds), (1, 1, 1, 1));
//! assert_eq!(b.total_seconds(), 90_061);
//! ```

use std::fmt;

/// Seconds in one day.
pub const SECS_PER_DAY: u64 = 86_400;
/// Seconds in one hour.
pub const SECS_PER_HOUR: u64 = 3_600;
/// Seconds in one minute.
pub const SECS_PER_MINUTE: u64 = 60;

/// Breakdown of a total-seconds value into display units.
///
/// Always derived from a remaining-seconds count with [`TimeBreakdown::from_seconds`];
/// the countdown never stores one of these independently of its total.
/// `hours < 24`, `minutes < 60` and `seconds < 60` hold for every value
/// produced that way. `days` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeBreakdown {
    /// Whole days.
    pub days: u64,
    /// Hours left after removing whole days.
    pub hours: u64,
    /// Minutes left after removing whole hours.
    pub minutes: u64,
    /// Seconds left after removing whole minutes.
    pub seconds: u64,
}

impl TimeBreakdown {
    /// Decomposes `total` by floor division, each unit taken from the
    /// remainder of the previous one.
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    /// Recombines the units into a total number of seconds.
    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// The four units as zero-padded two digit strings, largest first.
    ///
    /// Days wider than two digits are printed in full.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl From<u64> for TimeBreakdown {
    fn from(total: u64) -> Self {
        Self::from_seconds(total)
    }
}

impl fmt::Display for TimeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
