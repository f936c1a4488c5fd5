//! JSON output of a parsed document.

use std::io::Write;

use anyhow::{Context, Result};

use piyo_core::ParseOptions;

/// Parses the export and writes the document as JSON.
pub fn run<W: Write>(writer: &mut W, text: &str, pretty: bool, options: &ParseOptions) -> Result<()> {
    let document = piyo_core::parse_with(text, options).context("failed to parse export")?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &document)
    } else {
        serde_json::to_writer(&mut *writer, &document)
    }
    .context("failed to serialize document")?;

    // Broken pipe (e.g. piped into `head`) is not worth an error.
    let _ = writeln!(writer);
    Ok(())
}
