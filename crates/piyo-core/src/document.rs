//! Whole-document parsing: language detection and block splitting.

use chrono::FixedOffset;
use serde::Serialize;
use thiserror::Error;

use crate::entry::{Entry, EntryBuilder};
use crate::language::Language;

/// Separator appended so the final block terminates like every other one.
const TRAILING_SEPARATOR: &str = "----------";

/// Structural parse failures. Everything below document level degrades
/// locally instead of surfacing here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input held no readable line at all.
    #[error("empty input")]
    EmptyInput,
    /// Single-entry parsing found no block with a usable date.
    #[error("missing date")]
    MissingDate,
}

/// Options threaded through a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// UTC offset used to interpret every timestamp in the export.
    pub offset: FixedOffset,
}

impl Default for ParseOptions {
    /// UTC+9: the app's home market, and what its exports assume.
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset"),
        }
    }
}

/// The parsed form of one export file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub language: Language,
    /// Retained entries in block order. Blocks without a parseable date
    /// are absent.
    pub entries: Vec<Entry>,
}

/// Parses a potentially multi-day export with the default options.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parses a potentially multi-day export.
///
/// Fails only when the input holds no readable line; every other
/// irregularity degrades (dropped block, zero-valued field, fallback
/// record).
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    // Some exporters hand the document over as one line with literal
    // `\n` sequences; normalize before splitting.
    let text = text.replace("\\n", "\n");
    let mut lines = text.lines().map(str::trim);

    let Some(first) = lines.by_ref().find(|line| !line.is_empty()) else {
        return Err(ParseError::EmptyInput);
    };
    let language = Language::detect(first);

    let mut entries = Vec::new();
    let mut block = vec![language.strip_marker(first)];
    for line in lines.chain(std::iter::once(TRAILING_SEPARATOR)) {
        if is_separator(line) {
            entries.extend(parse_block(&block, language, options));
            block.clear();
        } else {
            block.push(line);
        }
    }

    tracing::debug!(language = %language, entries = entries.len(), "parsed export");
    Ok(Document { language, entries })
}

/// Parses an export expected to hold a single day, with default options.
pub fn parse_entry(text: &str) -> Result<Entry, ParseError> {
    parse_entry_with(text, &ParseOptions::default())
}

/// Parses an export expected to hold a single day: the first retained
/// entry of the document. Errors when no block carried a usable date.
pub fn parse_entry_with(text: &str, options: &ParseOptions) -> Result<Entry, ParseError> {
    let document = parse_with(text, options)?;
    document
        .entries
        .into_iter()
        .next()
        .ok_or(ParseError::MissingDate)
}

/// A line of ten or more dashes and nothing else delimits blocks.
fn is_separator(line: &str) -> bool {
    line.len() >= 10 && line.bytes().all(|byte| byte == b'-')
}

/// Builds one entry from a block's lines. The first non-blank line is the
/// header; a block whose header has no parseable date is dropped.
fn parse_block(block: &[&str], language: Language, options: &ParseOptions) -> Option<Entry> {
    let mut lines = block.iter().copied();
    let header = lines.by_ref().find(|line| !line.is_empty())?;
    let Some(date) = language.header_date(header) else {
        tracing::warn!(header, "skipping block without a parseable date");
        return None;
    };

    let mut builder = EntryBuilder::new(date, options.offset);
    for line in lines {
        builder.push_line(line);
    }
    Some(builder.finish())
}
