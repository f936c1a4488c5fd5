//! Timestamped care-activity records and the event-line classifier.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use regex::Regex;
use serde::Serialize;

use crate::util;

/// Field separator inside an event line: the export pads its columns with
/// runs of spaces, and three in a row only ever occur at a field boundary.
const NOTES_SEPARATOR: &str = "   ";

/// The one type keyword that contains a space.
const BODY_TEMP_KEYWORD: &str = "Body Temp.";

static LOG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9:]{5}(?: (?:AM|PM))?) +(.*)$").unwrap());

/// One timestamped care-activity record.
///
/// The shared fields come straight off the line; [`LogKind`] carries the
/// per-variant payload parsed out of `content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Log {
    /// Raw type keyword as it appeared in the line, e.g. `ミルク` or
    /// `Formula`.
    pub tag: String,
    /// Remainder of the line after the keyword, up to the notes separator.
    pub content: String,
    /// Free-text notes after the separator; empty when absent.
    pub notes: String,
    /// Entry date plus the line's clock time, in the configured offset.
    pub created_at: DateTime<FixedOffset>,
    pub kind: LogKind,
}

/// Typed payload of a [`Log`], selected by the bilingual keyword table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogKind {
    Nursing {
        // TODO: parse the per-side durations once the export's left/right
        // timing format is pinned down.
        #[serde(serialize_with = "minutes_opt::serialize")]
        left: Option<TimeDelta>,
        #[serde(serialize_with = "minutes_opt::serialize")]
        right: Option<TimeDelta>,
        amount: i64,
        unit: String,
    },
    Formula {
        amount: i64,
        unit: String,
    },
    Solid,
    Sleep,
    WakeUp {
        /// Elapsed sleep, from the parenthesized duration expression.
        #[serde(serialize_with = "minutes::serialize")]
        duration: TimeDelta,
    },
    Pee,
    Poop,
    Bath,
    BodyTemperature {
        degrees: f64,
        unit: String,
    },
    /// Unrecognized keyword; the shared fields are still populated.
    Other,
}

impl Log {
    /// Parses one event line, stamping it with the owning entry's date.
    ///
    /// Returns `None` when the line does not open with a clock-time token;
    /// everything past that degrades instead of failing (zero-valued
    /// numeric fields, [`LogKind::Other`] for unknown keywords).
    #[must_use]
    pub fn parse(line: &str, date: NaiveDate, offset: FixedOffset) -> Option<Self> {
        let caps = LOG_RE.captures(line)?;
        let (hour, minute) = util::hour_minute_from_clock(&caps[1]);
        let (tag, tail) = split_keyword(caps.get(2).map_or("", |rest| rest.as_str()));

        let mut segments = tail.split(NOTES_SEPARATOR);
        let content = segments.next().unwrap_or_default().trim();
        let notes = segments.collect::<Vec<_>>().join(NOTES_SEPARATOR);

        let (content, kind) = classify(tag, content);
        Some(Self {
            tag: tag.to_string(),
            content,
            notes: notes.trim().to_string(),
            created_at: stamp(date, hour, minute, offset),
            kind,
        })
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.created_at.format("%H:%M"), self.tag)?;
        if !self.content.is_empty() {
            write!(f, " {}", self.content)?;
        }
        Ok(())
    }
}

/// Splits the post-time remainder into the type keyword and its tail.
fn split_keyword(rest: &str) -> (&str, &str) {
    if let Some(tail) = rest.strip_prefix(BODY_TEMP_KEYWORD) {
        return (BODY_TEMP_KEYWORD, tail);
    }
    match rest.split_once(' ') {
        Some((keyword, tail)) => (keyword, tail),
        None => (rest, ""),
    }
}

/// Builds the record timestamp. Hour 24 (the PM rule applied to a 12
/// o'clock token) rolls into the next day, matching the normalization the
/// upstream library inherited from its time API.
fn stamp(date: NaiveDate, hour: i64, minute: i64, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(NaiveTime::MIN) + TimeDelta::hours(hour) + TimeDelta::minutes(minute);
    DateTime::from_naive_utc_and_offset(local - offset, offset)
}

/// Dispatches on the bilingual keyword table, returning the content as it
/// should be stored (parenthesis-stripped for the wake-up payload) and the
/// parsed variant.
fn classify(tag: &str, content: &str) -> (String, LogKind) {
    match tag {
        "母乳" | "Nursing" => (content.to_string(), nursing(content)),
        "ミルク" | "Formula" => {
            let (amount, unit) = util::amount_and_unit(content);
            (
                content.to_string(),
                LogKind::Formula {
                    amount,
                    unit: unit.to_string(),
                },
            )
        }
        "離乳食" | "Solid" => (content.to_string(), LogKind::Solid),
        "寝る" | "Sleep" => (content.to_string(), LogKind::Sleep),
        "起きる" | "Wake-up" => {
            let expr = strip_parens(content);
            (
                expr.to_string(),
                LogKind::WakeUp {
                    duration: util::duration_from_duration_expr(expr),
                },
            )
        }
        "おしっこ" | "Pee" => (content.to_string(), LogKind::Pee),
        "うんち" | "Poop" => (content.to_string(), LogKind::Poop),
        "お風呂" | "Baths" => (content.to_string(), LogKind::Bath),
        "体温" | BODY_TEMP_KEYWORD => {
            let (degrees, unit) = util::degrees_and_unit(content);
            (
                content.to_string(),
                LogKind::BodyTemperature {
                    degrees,
                    unit: unit.to_string(),
                },
            )
        }
        _ => (content.to_string(), LogKind::Other),
    }
}

/// The measured amount rides in the trailing parenthesized token of the
/// nursing content; the per-side durations stay unparsed.
fn nursing(content: &str) -> LogKind {
    let (amount, unit) = content
        .split_whitespace()
        .next_back()
        .map_or((0, ""), |field| util::amount_and_unit(strip_parens(field)));
    LogKind::Nursing {
        left: None,
        right: None,
        amount,
        unit: unit.to_string(),
    }
}

fn strip_parens(s: &str) -> &str {
    s.trim_matches(|c| c == '(' || c == ')')
}

/// Serializes durations as whole minutes, the granularity of the export.
mod minutes {
    use chrono::TimeDelta;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(delta.num_minutes())
    }
}

mod minutes_opt {
    use chrono::TimeDelta;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        delta: &Option<TimeDelta>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match delta {
            Some(delta) => serializer.serialize_some(&delta.num_minutes()),
            None => serializer.serialize_none(),
        }
    }
}
