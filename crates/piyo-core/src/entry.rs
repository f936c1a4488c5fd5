//! One calendar day of an export: identity, events, totals and journal.

use std::sync::LazyLock;

use chrono::{Days, FixedOffset, Months, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::log::Log;

static IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*) \(([0-9]+)(?:歳|y)([0-9]+)(?:か月|m)([0-9]+)(?:日|d)\)$").unwrap()
});

/// The tracked child, from a block's identity line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Baby {
    pub name: String,
    /// Entry date minus the reported age; `None` when the calendar
    /// arithmetic has no answer.
    pub birthday: Option<NaiveDate>,
}

impl Baby {
    /// Parses an identity line such as `ごふあ (0歳1か月0日)` or
    /// `Emma (0y0m22d)`. Non-matching lines yield `None`.
    fn from_identity_line(line: &str, date: NaiveDate) -> Option<Self> {
        let caps = IDENTITY_RE.captures(line)?;
        Some(Self {
            name: caps[1].to_string(),
            birthday: derived_birthday(date, &caps[2], &caps[3], &caps[4]),
        })
    }
}

fn derived_birthday(date: NaiveDate, years: &str, months: &str, days: &str) -> Option<NaiveDate> {
    let years: u32 = years.parse().ok()?;
    let months: u32 = months.parse().ok()?;
    let days: u64 = days.parse().ok()?;
    date.checked_sub_months(Months::new(years.checked_mul(12)?.checked_add(months)?))?
        .checked_sub_days(Days::new(days))
}

/// One calendar day's worth of parsed records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub baby: Option<Baby>,
    /// Events in source order.
    pub logs: Vec<Log>,
    /// Raw lines of the daily-totals block, kept verbatim.
    pub results: Vec<String>,
    /// Free-text journal block, newline-joined.
    pub journal: Option<String>,
}

/// Section cursor for a block's fixed layout. Sections only ever advance;
/// a line that does not fit the current section is re-examined in the next
/// one, so an absent section costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Identity,
    Events,
    Summary,
    Journal,
}

/// Outcome of offering a line to one section.
enum Step {
    /// The line was consumed; the next line starts from this section.
    Consumed(Section),
    /// The line did not fit; re-process it in this section.
    Advance(Section),
}

/// Accumulates one [`Entry`] from a block's lines.
///
/// The block's date must already be known (it comes from the header line,
/// which the document parser consumes); a block without one is never built.
#[derive(Debug)]
pub(crate) struct EntryBuilder {
    date: NaiveDate,
    offset: FixedOffset,
    baby: Option<Baby>,
    logs: Vec<Log>,
    results: Vec<String>,
    journal: Vec<String>,
    section: Section,
}

impl EntryBuilder {
    pub(crate) fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        Self {
            date,
            offset,
            baby: None,
            logs: Vec::new(),
            results: Vec::new(),
            journal: Vec::new(),
            section: Section::Identity,
        }
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        let mut section = self.section;
        loop {
            match self.step(section, line) {
                Step::Consumed(next) => {
                    self.section = next;
                    return;
                }
                Step::Advance(next) => section = next,
            }
        }
    }

    pub(crate) fn finish(mut self) -> Entry {
        while self.journal.last().is_some_and(|line| line.is_empty()) {
            self.journal.pop();
        }
        Entry {
            date: self.date,
            baby: self.baby,
            logs: self.logs,
            results: self.results,
            journal: if self.journal.is_empty() {
                None
            } else {
                Some(self.journal.join("\n"))
            },
        }
    }

    fn step(&mut self, section: Section, line: &str) -> Step {
        match section {
            Section::Identity => {
                if let Some(baby) = Baby::from_identity_line(line, self.date) {
                    self.baby = Some(baby);
                    Step::Consumed(Section::Events)
                } else {
                    Step::Advance(Section::Events)
                }
            }
            Section::Events => {
                if line.is_empty() {
                    if self.logs.is_empty() {
                        Step::Consumed(Section::Events)
                    } else {
                        Step::Consumed(Section::Summary)
                    }
                } else if let Some(log) = Log::parse(line, self.date, self.offset) {
                    self.logs.push(log);
                    Step::Consumed(Section::Events)
                } else {
                    Step::Advance(Section::Summary)
                }
            }
            Section::Summary => {
                if line.is_empty() {
                    if self.results.is_empty() {
                        Step::Consumed(Section::Summary)
                    } else {
                        Step::Consumed(Section::Journal)
                    }
                } else {
                    self.results.push(line.to_string());
                    Step::Consumed(Section::Summary)
                }
            }
            Section::Journal => {
                if self.journal.is_empty() && line.is_empty() {
                    Step::Consumed(Section::Journal)
                } else {
                    self.journal.push(line.to_string());
                    Step::Consumed(Section::Journal)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogKind;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
    }

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn build(lines: &[&str]) -> Entry {
        let mut builder = EntryBuilder::new(day(), tokyo());
        for line in lines {
            builder.push_line(line);
        }
        builder.finish()
    }

    #[test]
    fn identity_line_japanese() {
        let baby = Baby::from_identity_line("ごふあ (0歳1か月0日)", day()).unwrap();
        assert_eq!(baby.name, "ごふあ");
        assert_eq!(baby.birthday, NaiveDate::from_ymd_opt(2023, 11, 30));
    }

    #[test]
    fn identity_line_english() {
        let date = NaiveDate::from_ymd_opt(2022, 6, 13).unwrap();
        let baby = Baby::from_identity_line("Emma (0y0m22d)", date).unwrap();
        assert_eq!(baby.name, "Emma");
        assert_eq!(baby.birthday, NaiveDate::from_ymd_opt(2022, 5, 22));
    }

    #[test]
    fn identity_line_rejects_other_text() {
        assert!(Baby::from_identity_line("母乳合計　　   左 7分 / 右 5分", day()).is_none());
        assert!(Baby::from_identity_line("", day()).is_none());
    }

    #[test]
    fn sections_walk_in_order() {
        let entry = build(&[
            "ごふあ (0歳1か月0日)",
            "",
            "08:45 AM   ミルク 140ml   たくさん飲んだ",
            "01:55 PM   寝る",
            "",
            "ミルク合計　   7回 1140ml",
            "おしっこ合計   2回",
            "",
            "お食い初めだよ",
            "",
            "ここまで",
        ]);

        assert_eq!(entry.baby.as_ref().unwrap().name, "ごふあ");
        assert_eq!(entry.logs.len(), 2);
        assert!(matches!(entry.logs[0].kind, LogKind::Formula { .. }));
        assert_eq!(
            entry.results,
            vec!["ミルク合計　   7回 1140ml", "おしっこ合計   2回"]
        );
        assert_eq!(entry.journal.as_deref(), Some("お食い初めだよ\n\nここまで"));
    }

    #[test]
    fn identity_is_optional() {
        let entry = build(&["08:45 AM   ミルク 140ml"]);
        assert!(entry.baby.is_none());
        assert_eq!(entry.logs.len(), 1);
    }

    #[test]
    fn blank_lines_before_events_are_skipped() {
        let entry = build(&["", "", "08:45 AM   ミルク 140ml", "09:00 AM   おしっこ"]);
        assert_eq!(entry.logs.len(), 2);
        assert!(entry.results.is_empty());
    }

    #[test]
    fn non_event_line_falls_through_to_results() {
        // A totals block with no preceding blank line still lands in results.
        let entry = build(&["08:45 AM   ミルク 140ml", "ミルク合計　   7回 1140ml"]);
        assert_eq!(entry.logs.len(), 1);
        assert_eq!(entry.results, vec!["ミルク合計　   7回 1140ml"]);
    }

    #[test]
    fn trailing_journal_blanks_are_trimmed() {
        let entry = build(&[
            "08:45 AM   ミルク 140ml",
            "",
            "ミルク合計　   1回 140ml",
            "",
            "メモ",
            "",
            "",
        ]);
        assert_eq!(entry.journal.as_deref(), Some("メモ"));
    }

    #[test]
    fn empty_block_yields_bare_entry() {
        let entry = build(&[]);
        assert_eq!(entry.date, day());
        assert!(entry.baby.is_none());
        assert!(entry.logs.is_empty());
        assert!(entry.results.is_empty());
        assert!(entry.journal.is_none());
    }
}
