//! Log checker core
//!
//! Reads error lines out of a log through the [`ErrorLog`] seam and
//! reports whether any unexpected ones exist. The binary maps the
//! report to an exit code; CI pipelines key off that code.

use std::io::Write;

use crate::common::Result;

/// Source of classified error lines
///
/// Implemented by [`crate::gecko_log::GeckoLogParser`]; tests substitute
/// fakes to observe how the checker drives it.
pub trait ErrorLog {
    /// Error lines in file order; `include_expected` controls whether
    /// lines matching a declared expectation are returned as well.
    fn error_lines(&self, include_expected: bool) -> Result<Vec<String>>;
}

/// Outcome of one check run
#[derive(Debug)]
pub struct CheckReport {
    /// The unexpected error lines that were found, in file order
    pub error_lines: Vec<String>,
}

impl CheckReport {
    /// True iff the log was clean
    pub fn passed(&self) -> bool {
        self.error_lines.is_empty()
    }
}

/// Check a log for unexpected error lines
///
/// When `print` is set, each offending line is written to `out` followed
/// by a newline, in the order the log source returned them. Nothing is
/// written otherwise.
pub fn run<L, W>(log: &L, print: bool, out: &mut W) -> Result<CheckReport>
where
    L: ErrorLog + ?Sized,
    W: Write,
{
    let error_lines = log.error_lines(false)?;

    if print {
        for line in &error_lines {
            writeln!(out, "{}", line)?;
        }
    }

    Ok(CheckReport { error_lines })
}
