//! Per-day text summary of an export.

use std::io::Write;

use anyhow::{Context, Result};

use piyo_core::{Entry, LogKind, ParseOptions};

/// Parses the export and writes one block per day: date, child name, every
/// log line, and a formula roll-up.
pub fn run<W: Write>(writer: &mut W, text: &str, options: &ParseOptions) -> Result<()> {
    let document = piyo_core::parse_with(text, options).context("failed to parse export")?;

    if document.entries.is_empty() {
        writeln!(writer, "No entries found.")?;
        return Ok(());
    }

    for entry in &document.entries {
        write_entry(writer, entry)?;
    }
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, entry: &Entry) -> Result<()> {
    match &entry.baby {
        Some(baby) => writeln!(writer, "{} {}", entry.date, baby.name)?,
        None => writeln!(writer, "{}", entry.date)?,
    }

    let mut feeds = 0u32;
    let mut total = 0i64;
    let mut unit = "";
    for log in &entry.logs {
        writeln!(writer, "- {log}")?;
        if let LogKind::Formula {
            amount,
            unit: log_unit,
        } = &log.kind
        {
            feeds += 1;
            total += amount;
            unit = log_unit.as_str();
        }
    }

    if feeds > 0 {
        #[expect(clippy::cast_precision_loss, reason = "feed totals stay far below 2^52")]
        let average = total as f64 / f64::from(feeds);
        writeln!(
            writer,
            "Formula: {feeds} feeds, {total}{unit}, avg {average:.2}{unit}"
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn summary_lists_logs_and_formula_rollup() {
        let text = "【ぴよログ】2023/12/31(日)\n\
                    ごふあ (0歳1か月0日)\n\n\
                    08:45 AM   ミルク 140ml   たくさん飲んだ\n\
                    01:55 PM   寝る   \n\
                    03:50 PM   ミルク 200ml   ";

        let mut out = Vec::new();
        run(&mut out, text, &ParseOptions::default()).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert_snapshot!(rendered.trim_end(), @r"
        2023-12-31 ごふあ
        - 08:45 ミルク 140ml
        - 13:55 寝る
        - 15:50 ミルク 200ml
        Formula: 2 feeds, 340ml, avg 170.00ml
        ");
    }

    #[test]
    fn summary_without_entries_says_so() {
        let mut out = Vec::new();
        run(&mut out, "no markers here", &ParseOptions::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No entries found.\n");
    }

    #[test]
    fn summary_propagates_parse_errors() {
        let mut out = Vec::new();
        let err = run(&mut out, "", &ParseOptions::default()).unwrap_err();
        assert!(err.to_string().contains("failed to parse export"));
    }
}
