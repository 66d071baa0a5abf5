//! QA automation for a Gecko-based browser extension
//!
//! Two tools in one crate: a log checker that scans a Gecko log for
//! unexpected error lines, and a launcher that runs the browser UI
//! test suite through a Marionette-based harness.

pub mod check;
pub mod common;
pub mod gecko_log;
pub mod harness;
pub mod launcher;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use gecko_log::GeckoLogParser;
