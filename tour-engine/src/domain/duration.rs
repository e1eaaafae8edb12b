//! Parsing of walking durations.
//!
//! Track durations in the tour network document are written as a bare
//! number with a single unit suffix: `"30m"` is thirty minutes, `"2h"`
//! is two hours. There are no compound forms; `"1h30m"` is invalid.

use chrono::Duration;

/// Error returned when parsing an invalid duration literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration: {reason}")]
pub struct InvalidDuration {
    reason: &'static str,
}

/// Parses a duration literal such as `"30m"` or `"2h"`.
///
/// Surrounding whitespace is ignored. The value must be a non-negative
/// integer followed by exactly one unit character, `m` for minutes or
/// `h` for hours.
///
/// # Examples
///
/// ```
/// use tour_engine::domain::parse_duration;
/// use chrono::Duration;
///
/// assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
/// assert_eq!(parse_duration("2h").unwrap(), Duration::hours(2));
/// assert_eq!(parse_duration(" 45m\n").unwrap(), Duration::minutes(45));
///
/// assert!(parse_duration("").is_err());
/// assert!(parse_duration("30").is_err());
/// assert!(parse_duration("h").is_err());
/// assert!(parse_duration("1h30m").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, InvalidDuration> {
    let trimmed = s.trim();
    let bytes = trimmed.as_bytes();

    if bytes.is_empty() {
        return Err(InvalidDuration {
            reason: "must not be empty",
        });
    }

    let mut value: i64 = 0;
    let mut digits = 0usize;
    while digits < bytes.len() && bytes[digits].is_ascii_digit() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(bytes[digits] - b'0')))
            .ok_or(InvalidDuration {
                reason: "value out of range",
            })?;
        digits += 1;
    }

    if digits == 0 {
        return Err(InvalidDuration {
            reason: "must start with a number",
        });
    }
    if digits + 1 != bytes.len() {
        return Err(InvalidDuration {
            reason: "must be a number followed by a single 'm' or 'h'",
        });
    }

    match bytes[digits] {
        b'm' => Duration::try_minutes(value).ok_or(InvalidDuration {
            reason: "value out of range",
        }),
        b'h' => value
            .checked_mul(60)
            .and_then(Duration::try_minutes)
            .ok_or(InvalidDuration {
                reason: "value out of range",
            }),
        _ => Err(InvalidDuration {
            reason: "unit must be 'm' or 'h'",
        }),
    }
}
