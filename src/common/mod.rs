//! Common utilities shared by the log checker and the UI test harness

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};
