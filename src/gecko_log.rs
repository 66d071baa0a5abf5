//! Gecko log parsing
//!
//! Classifies log lines as errors by a fixed set of markers and honors
//! in-log expectation declarations written by the UI test harness, so a
//! test that provokes a known error can mark it as expected.

use std::path::{Path, PathBuf};

use crate::check::ErrorLog;
use crate::common::{Error, Result};

/// Markers that classify a line as an error
const ERROR_MARKERS: &[&str] = &[
    "JavaScript error:",
    "console.error:",
    "###!!! ABORT",
    "###!!! ASSERTION",
];

/// Declaration written into the log ahead of a provoked error.
/// Error lines containing the declared pattern are "expected" from the
/// declaration onward.
const EXPECTATION_MARKER: &str = "[UiTestHarness] expecting error:";

/// Parser for a Gecko log file
pub struct GeckoLogParser {
    path: PathBuf,
}

impl GeckoLogParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole log file and split it into lines
    ///
    /// Gecko logs can contain arbitrary bytes, so the content is decoded
    /// lossily rather than rejected.
    pub fn all_lines(&self) -> Result<Vec<String>> {
        let bytes =
            std::fs::read(&self.path).map_err(|e| Error::log_read(&self.path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(content
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect())
    }

    /// Return every error line, in file order
    ///
    /// When `include_expected` is false, error lines matching an earlier
    /// expectation declaration are filtered out. Declarations apply
    /// forward only; one declaration covers any number of later matches.
    pub fn error_lines(&self, include_expected: bool) -> Result<Vec<String>> {
        let mut expected_patterns: Vec<String> = Vec::new();
        let mut errors = Vec::new();

        for line in self.all_lines()? {
            if let Some(pos) = line.find(EXPECTATION_MARKER) {
                let pattern = line[pos + EXPECTATION_MARKER.len()..].trim();
                if !pattern.is_empty() {
                    expected_patterns.push(pattern.to_string());
                }
                continue;
            }

            if !is_error_line(&line) {
                continue;
            }

            let expected = expected_patterns.iter().any(|p| line.contains(p.as_str()));
            if include_expected || !expected {
                errors.push(line);
            }
        }

        Ok(errors)
    }
}

impl ErrorLog for GeckoLogParser {
    fn error_lines(&self, include_expected: bool) -> Result<Vec<String>> {
        GeckoLogParser::error_lines(self, include_expected)
    }
}

fn is_error_line(line: &str) -> bool {
    ERROR_MARKERS.iter().any(|m| line.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn log_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_clean_log_has_no_errors() {
        let file = log_file("1444161817220\tMarionette\tINFO\tloaded\nall good here\n");
        let parser = GeckoLogParser::new(file.path());
        assert!(parser.error_lines(false).unwrap().is_empty());
        assert!(parser.error_lines(true).unwrap().is_empty());
    }

    #[test]
    fn test_error_markers_are_detected_in_order() {
        let file = log_file(
            "console.error: [Extension] broken\n\
             some info line\n\
             JavaScript error: chrome://foo.js, line 10: ReferenceError\n\
             ###!!! ASSERTION: bad state\n",
        );
        let parser = GeckoLogParser::new(file.path());
        let lines = parser.error_lines(false).unwrap();
        assert_eq!(
            lines,
            vec![
                "console.error: [Extension] broken",
                "JavaScript error: chrome://foo.js, line 10: ReferenceError",
                "###!!! ASSERTION: bad state",
            ]
        );
    }

    #[test]
    fn test_expected_errors_are_filtered() {
        let file = log_file(
            "[UiTestHarness] expecting error: ReferenceError: foo\n\
             JavaScript error: test.js, ReferenceError: foo is not defined\n\
             console.error: unrelated failure\n",
        );
        let parser = GeckoLogParser::new(file.path());
        let lines = parser.error_lines(false).unwrap();
        assert_eq!(lines, vec!["console.error: unrelated failure"]);

        // With include_expected the suppressed line comes back
        let all = parser.error_lines(true).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_expectation_applies_forward_only() {
        let file = log_file(
            "JavaScript error: early ReferenceError: foo\n\
             [UiTestHarness] expecting error: ReferenceError: foo\n\
             JavaScript error: late ReferenceError: foo\n",
        );
        let parser = GeckoLogParser::new(file.path());
        let lines = parser.error_lines(false).unwrap();
        assert_eq!(lines, vec!["JavaScript error: early ReferenceError: foo"]);
    }

    #[test]
    fn test_one_declaration_covers_many_matches() {
        let file = log_file(
            "[UiTestHarness] expecting error: known-bad\n\
             console.error: known-bad one\n\
             console.error: known-bad two\n",
        );
        let parser = GeckoLogParser::new(file.path());
        assert!(parser.error_lines(false).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"console.error: bad bytes \xff\xfe here\n")
            .unwrap();
        let parser = GeckoLogParser::new(file.path());
        let lines = parser.error_lines(false).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("console.error:"));
    }

    #[test]
    fn test_missing_file_is_a_log_read_error() {
        let parser = GeckoLogParser::new("/no/such/gecko.log");
        let err = parser.error_lines(false).unwrap_err();
        assert!(matches!(err, Error::LogRead { .. }));
        assert!(err.to_string().contains("/no/such/gecko.log"));
    }
}
