//! Small token parsers shared by the line classifiers.
//!
//! Every function here degrades to a zero value on unparseable input
//! instead of returning an error: the export format is loose enough that a
//! single bad token must never abort a whole parse.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9:]{5}) ?(AM|PM)?$").unwrap());

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([0-9]+)(?:時間|h))?([0-9]+)(?:分|m)$").unwrap());

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)(.+)$").unwrap());

static DEGREES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9.]+)(.+)").unwrap());

/// Parses an integer, returning 0 when the string is not one.
#[must_use]
pub fn atoi(s: &str) -> i64 {
    s.parse().unwrap_or(0)
}

/// Splits a clock token such as `"20:15"` or `"07:35 AM"` into hours and
/// minutes.
///
/// A `PM` suffix adds 12 to the hour unconditionally, `"12:30 PM"`
/// included, so callers can observe hour 24. That mirrors the upstream
/// app's rule and is deliberately not normalized here; the timestamp
/// arithmetic in the classifier rolls hour 24 into the next day.
/// Malformed input yields `(0, 0)`.
#[must_use]
pub fn hour_minute_from_clock(s: &str) -> (i64, i64) {
    let Some(caps) = CLOCK_RE.captures(s) else {
        return (0, 0);
    };
    let mut parts = caps[1].split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return (0, 0);
    };
    let hour = atoi(hour);
    if caps.get(2).is_some_and(|meridiem| meridiem.as_str() == "PM") {
        return (hour + 12, atoi(minute));
    }
    (hour, atoi(minute))
}

/// Splits a duration expression such as `"8時間15分"`, `"7h40m"` or `"20m"`
/// into hours and minutes. The hour group is optional; unparseable input
/// yields `(0, 0)`.
#[must_use]
pub fn hour_minute_from_duration_expr(s: &str) -> (i64, i64) {
    let Some(caps) = DURATION_RE.captures(s) else {
        return (0, 0);
    };
    let hours = caps.get(1).map_or(0, |hours| atoi(hours.as_str()));
    (hours, atoi(&caps[2]))
}

/// Interprets a duration expression as a [`TimeDelta`].
#[must_use]
pub fn duration_from_duration_expr(s: &str) -> TimeDelta {
    let (hours, minutes) = hour_minute_from_duration_expr(s);
    TimeDelta::hours(hours) + TimeDelta::minutes(minutes)
}

/// Splits a leading run of digits from its trailing unit, e.g. `"140ml"`
/// into `(140, "ml")`. Input without both a digit prefix and a unit suffix
/// yields `(0, s)` untouched.
#[must_use]
pub fn amount_and_unit(s: &str) -> (i64, &str) {
    let Some(caps) = AMOUNT_RE.captures(s) else {
        return (0, s);
    };
    let unit = caps.get(2).map_or("", |unit| unit.as_str());
    (atoi(&caps[1]), unit)
}

/// Float variant of [`amount_and_unit`] for temperature readings, e.g.
/// `"36.5°C"` into `(36.5, "°C")`.
#[must_use]
pub fn degrees_and_unit(s: &str) -> (f64, &str) {
    let Some(caps) = DEGREES_RE.captures(s) else {
        return (0.0, s);
    };
    let degrees = caps[1].parse().unwrap_or(0.0);
    let unit = caps.get(2).map_or("", |unit| unit.as_str());
    (degrees, unit)
}
