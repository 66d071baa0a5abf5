//! Argument handling for the test harness
//!
//! The framework owns a base set of options; application-specific
//! options arrive through the [`Arguments`] extension, which augments
//! the base `clap` command and validates the parsed matches.

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Args, Command};

use crate::common::{Error, Result};

/// Options every harness run understands, regardless of the
/// application under test
#[derive(Args, Debug, Clone)]
pub struct BaseArgs {
    /// Test files or directories to run
    #[arg(value_name = "TEST", required = true)]
    pub tests: Vec<PathBuf>,

    /// Path to the Marionette driver executable
    #[arg(long, value_name = "PATH")]
    pub driver: Option<PathBuf>,

    /// Directory for logs and results
    #[arg(long, value_name = "DIR", default_value = "ui-test-results")]
    pub output: PathBuf,

    /// Maximum run time in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verbose driver output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Extension point for application-specific arguments
///
/// `augment` contributes options to the base command; `verify` runs
/// after parsing and may reject a combination the grammar allows.
pub trait Arguments: Send {
    fn augment(&self, cmd: Command) -> Command;

    fn verify(&self, matches: &ArgMatches) -> Result<()>;
}

/// Browser-UI argument extension
pub struct UiArguments;

impl UiArguments {
    /// Factory with the signature the wiring expects
    pub fn factory() -> Box<dyn Arguments> {
        Box::new(UiArguments)
    }
}

impl Arguments for UiArguments {
    fn augment(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("binary")
                .long("binary")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Browser binary under test"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Browser profile directory to use"),
        )
        .arg(
            Arg::new("gecko-log")
                .long("gecko-log")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Where the browser log is written (default: <output>/gecko.log)"),
        )
    }

    fn verify(&self, matches: &ArgMatches) -> Result<()> {
        if let Some(binary) = matches.get_one::<PathBuf>("binary") {
            if !binary.exists() {
                return Err(Error::InvalidArgument(format!(
                    "browser binary '{}' does not exist",
                    binary.display()
                )));
            }
        }

        if let Some(profile) = matches.get_one::<PathBuf>("profile") {
            if !profile.is_dir() {
                return Err(Error::InvalidArgument(format!(
                    "profile '{}' is not a directory",
                    profile.display()
                )));
            }
        }

        Ok(())
    }
}
