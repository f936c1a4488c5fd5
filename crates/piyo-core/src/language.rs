//! Export language detection and per-language header dates.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

/// Marker the app prepends to the first line of a Japanese export.
const JAPANESE_MARKER: &str = "【ぴよログ】";

/// Marker the app prepends to the first line of an English export.
const ENGLISH_MARKER: &str = "[PiyoLog]";

static JAPANESE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})").unwrap());

/// Language an export was written in, detected from its header marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Japanese,
    English,
    /// No known header marker was found. Header dates never parse in this
    /// state, so every block of such a document is dropped.
    #[default]
    Unknown,
}

impl Language {
    /// Detects the language from the document's first line.
    #[must_use]
    pub fn detect(line: &str) -> Self {
        if line.contains(JAPANESE_MARKER) {
            Self::Japanese
        } else if line.contains(ENGLISH_MARKER) {
            Self::English
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Japanese => "japanese",
            Self::English => "english",
            Self::Unknown => "unknown",
        }
    }

    const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Japanese => Some(JAPANESE_MARKER),
            Self::English => Some(ENGLISH_MARKER),
            Self::Unknown => None,
        }
    }

    /// Returns the part of `line` after this language's header marker, or
    /// the line untouched when the marker is absent.
    pub(crate) fn strip_marker(self, line: &str) -> &str {
        match self.marker() {
            Some(marker) => line
                .split_once(marker)
                .map_or(line, |(_, header)| header),
            None => line,
        }
    }

    /// Parses a block header into its calendar date.
    ///
    /// Japanese headers read `2022/6/13(木)` (the parenthesized weekday is
    /// ignored); English headers read `Thu, Jun 13, 2022` (everything after
    /// the first comma-space is the date). Monthly headers such as
    /// `2024年8月` carry no day and yield `None`.
    pub(crate) fn header_date(self, line: &str) -> Option<NaiveDate> {
        match self {
            Self::Japanese => {
                let caps = JAPANESE_DATE_RE.captures(line)?;
                NaiveDate::from_ymd_opt(
                    caps[1].parse().ok()?,
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                )
            }
            Self::English => {
                let (_, date) = line.split_once(", ")?;
                NaiveDate::parse_from_str(date, "%b %d, %Y").ok()
            }
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
