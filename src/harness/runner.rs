//! Test runner contract and the browser-UI runner
//!
//! The framework hands a [`RunnerConfig`] to a runner factory and calls
//! `run()` once. Everything the browser-UI runner does happens behind
//! that one call: it resolves the driver, spawns it, and scans the
//! gecko log afterwards.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use clap::ArgMatches;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::gecko_log::GeckoLogParser;

use super::arguments::BaseArgs;

/// Framework-supplied construction parameters for a runner
pub struct RunnerConfig {
    /// Parsed base options
    pub base: BaseArgs,
    /// Full matches, including extension options
    pub matches: ArgMatches,
}

/// Test execution extension point
#[async_trait]
pub trait TestRunner: Send {
    /// Execute the suite once and summarize the outcome
    async fn run(&mut self) -> Result<RunSummary>;
}

/// Outcome of one harness run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    /// Test paths that were handed to the driver
    pub tests: Vec<String>,
    /// Driver exit code, if it exited normally
    pub driver_exit: Option<i32>,
    /// Unexpected error lines found in the gecko log afterwards
    pub log_errors: Vec<String>,
    /// Wall-clock duration of the driver run
    pub duration_ms: u64,
    /// True iff the driver exited 0 and the log was clean
    pub passed: bool,
}

/// Browser-UI runner: spawns the Marionette driver exactly once
pub struct UiTestRunner {
    config: RunnerConfig,
    app_config: Config,
}

impl UiTestRunner {
    /// Factory with the signature the wiring expects
    pub fn factory(config: RunnerConfig) -> Result<Box<dyn TestRunner>> {
        Ok(Box::new(Self {
            app_config: Config::load()?,
            config,
        }))
    }

    fn gecko_log_path(&self) -> PathBuf {
        self.config
            .matches
            .get_one::<PathBuf>("gecko-log")
            .cloned()
            .unwrap_or_else(|| self.config.base.output.join("gecko.log"))
    }

    /// Translate harness options into driver flags
    fn driver_command(&self, driver: &Path, gecko_log: &Path) -> TokioCommand {
        let base = &self.config.base;
        let mut cmd = TokioCommand::new(driver);
        // If the run times out the driver must not outlive the harness
        cmd.kill_on_drop(true);
        cmd.args(&self.app_config.harness.driver_args);
        cmd.arg("--gecko-log").arg(gecko_log);

        let binary = self
            .config
            .matches
            .get_one::<PathBuf>("binary")
            .or(self.app_config.harness.binary.as_ref());
        if let Some(binary) = binary {
            cmd.arg("--binary").arg(binary);
        }

        if let Some(profile) = self.config.matches.get_one::<PathBuf>("profile") {
            cmd.arg("--profile").arg(profile);
        }

        if base.verbose {
            cmd.arg("-v");
        }

        for test in &base.tests {
            cmd.arg(test);
        }

        cmd
    }
}

#[async_trait]
impl TestRunner for UiTestRunner {
    async fn run(&mut self) -> Result<RunSummary> {
        let base = &self.config.base;
        std::fs::create_dir_all(&base.output)?;

        let driver = self.app_config.find_driver(base.driver.as_deref())?;
        let gecko_log = self.gecko_log_path();

        // A stale log from an earlier run must not fail this one
        if gecko_log.exists() {
            std::fs::write(&gecko_log, "")?;
        }

        let timeout_secs = base.timeout.unwrap_or(self.app_config.timeouts.run_secs);
        let mut cmd = self.driver_command(&driver, &gecko_log);

        info!(driver = %driver.display(), tests = base.tests.len(), "launching test driver");
        debug!(gecko_log = %gecko_log.display(), timeout_secs, "driver run parameters");

        // Driver stdio is inherited: its test reporting goes straight
        // to the terminal.
        let start = Instant::now();
        let status = tokio::time::timeout(Duration::from_secs(timeout_secs), cmd.status())
            .await
            .map_err(|_| Error::RunTimeout(timeout_secs))?
            .map_err(|e| Error::DriverStartFailed(format!("{}: {}", driver.display(), e)))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let log_errors = if gecko_log.exists() {
            GeckoLogParser::new(&gecko_log).error_lines(false)?
        } else {
            warn!(path = %gecko_log.display(), "gecko log was not written; skipping log check");
            Vec::new()
        };

        // A clean driver exit is not enough: errors the browser logged
        // during the run fail it too.
        let passed = status.code() == Some(0) && log_errors.is_empty();
        let summary = RunSummary {
            tests: base.tests.iter().map(|p| p.display().to_string()).collect(),
            driver_exit: status.code(),
            log_errors,
            duration_ms,
            passed,
        };

        let results_path = base.output.join("results.json");
        std::fs::write(&results_path, serde_json::to_string_pretty(&summary)?)?;
        info!(path = %results_path.display(), "wrote run summary");

        if summary.passed {
            println!(
                "{} UI tests passed ({} tests, {} ms)",
                "✓".green(),
                summary.tests.len(),
                summary.duration_ms
            );
        } else {
            println!(
                "{} UI tests failed (driver exit: {:?}, log errors: {})",
                "✗".red(),
                summary.driver_exit,
                summary.log_errors.len()
            );
            for line in &summary.log_errors {
                println!("  {}", line);
            }
        }

        Ok(summary)
    }
}
