//! Parser for PiyoLog export text.
//!
//! PiyoLog is a baby-care tracking app whose export feature produces
//! loosely structured, bilingual (Japanese or English) text: a document
//! header, one dash-separated block per day, and within each block an
//! identity line, timestamped event lines, a daily-totals block and a
//! free-text journal. This crate recovers that structure:
//! - [`parse`] / [`parse_with`]: whole-document parsing (many days)
//! - [`parse_entry`] / [`parse_entry_with`]: single-day parsing
//! - [`util`]: the small token parsers the line classifiers build on

mod document;
mod entry;
mod language;
mod log;
pub mod util;

pub use document::{
    Document, ParseError, ParseOptions, parse, parse_entry, parse_entry_with, parse_with,
};
pub use entry::{Baby, Entry};
pub use language::Language;
pub use log::{Log, LogKind};
