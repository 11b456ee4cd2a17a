//! Countdown and timestamp presentation
//!
//! Pure mapping from countdown state to what the user sees. Nothing in here
//! consults the clock or returns an error; bad inputs fall back to a safe
//! display value.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::state::{TokenStatus, TokenTimerState};

/// Rendered when no authoritative countdown is available.
pub const PLACEHOLDER: &str = "--:--:--";

/// IST offset (UTC+05:30), the display timezone for absolute timestamps.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Severity colour of the countdown display.
///
/// `Orange` is reserved for a future warning tier; current rules only ever
/// produce `Green` or `Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerColor {
    Green,
    Orange,
    Red,
}

/// Format remaining seconds as `HH:MM:SS`, each field zero-padded.
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Colour for a countdown, as a pure function of its two inputs.
///
/// A fully elapsed countdown is red regardless of status, and an `Expired`
/// status is red regardless of remaining seconds (status is authoritative,
/// even though the two should coincide). Everything else renders green,
/// including unknown statuses while a token is present.
pub fn countdown_color(display_seconds: u64, status: TokenStatus) -> TimerColor {
    if display_seconds == 0 {
        TimerColor::Red
    } else if status == TokenStatus::Expired {
        TimerColor::Red
    } else {
        TimerColor::Green
    }
}

/// Map a timer state to its rendered countdown string and colour.
pub fn countdown_display(state: &TokenTimerState) -> (String, TimerColor) {
    if !state.has_token() {
        return (PLACEHOLDER.to_string(), TimerColor::Green);
    }
    let seconds = state.display_seconds();
    (
        format_countdown(seconds),
        countdown_color(seconds, state.token_status()),
    )
}

/// Format an ISO8601 timestamp in Asia/Kolkata time with an `IST` suffix.
///
/// A value that fails to parse is shown verbatim rather than dropped, and an
/// absent value renders as a dash.
pub fn format_ist(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => {
            // east_opt only fails for out-of-range offsets; +05:30 is fixed.
            let ist = FixedOffset::east_opt(IST_OFFSET_SECS).unwrap();
            dt.with_timezone(&ist)
                .format("%d %b %Y, %I:%M:%S %p IST")
                .to_string()
        }
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_countdown_fields_zero_padded() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(5), "00:00:05");
        assert_eq!(format_countdown(61), "00:01:01");
        assert_eq!(format_countdown(3661), "01:01:01");
        assert_eq!(format_countdown(43_200), "12:00:00");
        assert_eq!(format_countdown(359_999), "99:59:59");
    }

    #[test]
    fn color_is_pure_in_both_inputs() {
        struct TestCase {
            seconds: u64,
            status: TokenStatus,
            expected: TimerColor,
        }

        let tests = vec![
            TestCase {
                seconds: 0,
                status: TokenStatus::Active,
                expected: TimerColor::Red,
            },
            TestCase {
                seconds: 0,
                status: TokenStatus::Expired,
                expected: TimerColor::Red,
            },
            // Status wins over remaining seconds.
            TestCase {
                seconds: 500,
                status: TokenStatus::Expired,
                expected: TimerColor::Red,
            },
            TestCase {
                seconds: 500,
                status: TokenStatus::Active,
                expected: TimerColor::Green,
            },
            // Non-expired unknown statuses render neutral-positive.
            TestCase {
                seconds: 500,
                status: TokenStatus::Unknown,
                expected: TimerColor::Green,
            },
            TestCase {
                seconds: 500,
                status: TokenStatus::Error,
                expected: TimerColor::Green,
            },
            TestCase {
                seconds: 500,
                status: TokenStatus::NotGenerated,
                expected: TimerColor::Green,
            },
        ];

        for (index, test) in tests.iter().enumerate() {
            assert_eq!(
                countdown_color(test.seconds, test.status),
                test.expected,
                "TC{} failed",
                index
            );
            // Same inputs, same answer.
            assert_eq!(
                countdown_color(test.seconds, test.status),
                countdown_color(test.seconds, test.status),
            );
        }
    }

    #[test]
    fn tokenless_state_renders_placeholder() {
        let state = TokenTimerState::new();
        let (text, color) = countdown_display(&state);
        assert_eq!(text, PLACEHOLDER);
        assert_eq!(color, TimerColor::Green);
    }

    #[test]
    fn expired_countdown_renders_zero_and_red() {
        let mut state = TokenTimerState::new();
        state.on_authoritative_update(Some(-120), TokenStatus::Expired, None, None, None);
        let (text, color) = countdown_display(&state);
        assert_eq!(text, "00:00:00");
        assert_eq!(color, TimerColor::Red);
    }

    #[test]
    fn active_countdown_turns_red_once_it_reaches_zero() {
        let mut state = TokenTimerState::new();
        state.on_authoritative_update(Some(5), TokenStatus::Active, None, None, None);

        let (text, color) = countdown_display(&state);
        assert_eq!(text, "00:00:05");
        assert_eq!(color, TimerColor::Green);

        for _ in 0..5 {
            state.tick();
        }
        let (text, color) = countdown_display(&state);
        assert_eq!(text, "00:00:00");
        assert_eq!(color, TimerColor::Red);
    }

    #[test]
    fn formats_ist_timestamps_with_suffix() {
        let formatted = format_ist(Some("2026-08-30T18:30:00+05:30"));
        assert_eq!(formatted, "30 Aug 2026, 06:30:00 PM IST");

        // UTC input is converted into IST before rendering.
        let formatted = format_ist(Some("2026-08-30T13:00:00Z"));
        assert_eq!(formatted, "30 Aug 2026, 06:30:00 PM IST");
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_raw_value() {
        assert_eq!(format_ist(Some("not-a-date")), "not-a-date");
        assert_eq!(format_ist(None), "-");
    }

    #[test]
    fn color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TimerColor::Green).unwrap(), r#""green""#);
        assert_eq!(serde_json::to_string(&TimerColor::Red).unwrap(), r#""red""#);
        assert_eq!(serde_json::to_string(&TimerColor::Orange).unwrap(), r#""orange""#);
    }
}
