//! Display flags derived from the countdown state.
//!
//! Nothing here is mutated on its own except `fullscreen`, which mirrors the
//! fullscreen collaborator. Everything else is recomputed from a
//! [`CountdownState`] every time it is needed.

use crate::breakdown::TimeBreakdown;
use crate::timer::CountdownState;

/// Remaining seconds below which the display blinks.
pub const BLINK_THRESHOLD_SECS: u64 = 60;

/// What the rendering layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
    pub breakdown: TimeBreakdown,
    /// Less than a minute left and not yet at zero.
    pub blinking: bool,
    /// Highlighted half of the blink. Alternates every second while blinking.
    pub blink_on: bool,
    /// Show the "time's up" view.
    pub ended: bool,
    pub fullscreen: bool,
}

impl Presentation {
    /// Flags for `state`, with `fullscreen` taken from the collaborator.
    pub fn derive(state: &CountdownState, fullscreen: bool) -> Self {
        let remaining = state.total_seconds_remaining;
        let blinking = is_blinking(remaining) && !state.ended;
        Self {
            breakdown: TimeBreakdown::from_seconds(remaining),
            blinking,
            blink_on: blinking && remaining % 2 == 0,
            ended: state.ended,
            fullscreen,
        }
    }
}

/// `true` exactly when `0 < remaining < 60`.
pub fn is_blinking(remaining: u64) -> bool {
    remaining > 0 && remaining < BLINK_THRESHOLD_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(remaining: u64) -> CountdownState {
        CountdownState {
            total_seconds_remaining: remaining,
            running: true,
            paused: false,
            ended: false,
        }
    }

    #[test]
    fn test_blinking_iff_under_a_minute() {
        for remaining in [0, 1, 2, 30, 59, 60, 61, 3_600, 86_400] {
            let expected = remaining > 0 && remaining < 60;
            assert_eq!(is_blinking(remaining), expected, "remaining {}", remaining);
            assert_eq!(
                Presentation::derive(&running(remaining), false).blinking,
                expected,
                "remaining {}",
                remaining
            );
        }
    }

    #[test]
    fn test_ended_never_blinks() {
        let ended = CountdownState {
            total_seconds_remaining: 0,
            running: false,
            paused: false,
            ended: true,
        };
        let p = Presentation::derive(&ended, false);
        assert!(p.ended);
        assert!(!p.blinking);
        assert!(!p.blink_on);
    }

    #[test]
    fn test_blink_alternates_per_second() {
        let even = Presentation::derive(&running(10), false);
        let odd = Presentation::derive(&running(9), false);
        assert!(even.blink_on);
        assert!(!odd.blink_on);
        assert!(!Presentation::derive(&running(120), false).blink_on);
    }

    #[test]
    fn test_fullscreen_is_carried_through() {
        assert!(Presentation::derive(&running(5), true).fullscreen);
        assert!(!Presentation::derive(&running(5), false).fullscreen);
    }

    #[test]
    fn test_breakdown_matches_state() {
        let p = Presentation::derive(&running(3_661), false);
        assert_eq!(p.breakdown, TimeBreakdown::from_seconds(3_661));
    }
}
