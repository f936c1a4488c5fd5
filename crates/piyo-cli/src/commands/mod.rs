//! Subcommand implementations.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

pub mod export;
pub mod summary;

/// Reads the export text from a file, or stdin when no path was given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => io::read_to_string(io::stdin()).context("failed to read stdin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_input_reads_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("export.txt");
        std::fs::write(&path, "【ぴよログ】2023/12/31(日)\n").unwrap();

        let text = read_input(Some(&path)).unwrap();
        assert!(text.starts_with("【ぴよログ】"));
    }

    #[test]
    fn read_input_reports_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/export.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/export.txt"));
    }
}
