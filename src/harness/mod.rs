//! Browser UI test harness
//!
//! A small framework with two substitutable extension points: an
//! argument extension that contributes application options, and a
//! runner extension that executes the suite. Extensions are supplied as
//! factories, not instances, so the framework can construct them later
//! with parameters of its own making.

pub mod arguments;
pub mod runner;

pub use arguments::{Arguments, BaseArgs, UiArguments};
pub use runner::{RunSummary, RunnerConfig, TestRunner, UiTestRunner};

use async_trait::async_trait;
use clap::{Args, Command, FromArgMatches};

use crate::common::{logging, Error, Result};

/// Constructs the argument extension
pub type ArgumentsFactory = fn() -> Box<dyn Arguments>;

/// Constructs the runner extension from framework-supplied parameters
pub type RunnerFactory = fn(RunnerConfig) -> Result<Box<dyn TestRunner>>;

/// The injected extension points for one harness invocation
#[derive(Clone, Copy)]
pub struct Wiring {
    pub arguments: ArgumentsFactory,
    pub runner: RunnerFactory,
}

/// Harness entry-point contract
///
/// `args` is the argument list without the program name; `None` means
/// use the process arguments.
#[async_trait]
pub trait Entry: Send + Sync {
    async fn cli(&self, wiring: Wiring, args: Option<Vec<String>>) -> Result<i32>;
}

/// The production harness
pub struct Harness;

#[async_trait]
impl Entry for Harness {
    async fn cli(&self, wiring: Wiring, args: Option<Vec<String>>) -> Result<i32> {
        let argv: Vec<String> = match args {
            Some(args) => std::iter::once(PROGRAM.to_string()).chain(args).collect(),
            None => std::env::args().collect(),
        };

        let arguments = (wiring.arguments)();
        let cmd = arguments.augment(base_command());

        let matches = match cmd.try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => {
                // --help and --version land here too; only real parse
                // errors are failures. Either way no runner is built.
                let code = if e.use_stderr() { 2 } else { 0 };
                e.print()?;
                return Ok(code);
            }
        };

        let base = BaseArgs::from_arg_matches(&matches)
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;

        logging::init_harness(&base.output, base.verbose);

        arguments.verify(&matches)?;

        let mut runner = (wiring.runner)(RunnerConfig { base, matches })?;
        let summary = runner.run().await?;

        Ok(if summary.passed { 0 } else { 1 })
    }
}

const PROGRAM: &str = "run-ui-tests";

fn base_command() -> Command {
    let cmd = Command::new(PROGRAM)
        .about("Run the browser UI test suite")
        .version(env!("CARGO_PKG_VERSION"));
    BaseArgs::augment_args(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Runner that reports a canned outcome
    struct CannedRunner {
        passed: bool,
    }

    #[async_trait]
    impl TestRunner for CannedRunner {
        async fn run(&mut self) -> Result<RunSummary> {
            Ok(RunSummary {
                tests: Vec::new(),
                driver_exit: Some(if self.passed { 0 } else { 1 }),
                log_errors: Vec::new(),
                duration_ms: 0,
                passed: self.passed,
            })
        }
    }

    fn args(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    fn output_flag(dir: &tempfile::TempDir) -> String {
        dir.path().join("out").display().to_string()
    }

    // Each test wires its own factory functions around its own statics;
    // fn pointers cannot capture.

    static PARSE_ERR_RUNNERS: AtomicUsize = AtomicUsize::new(0);

    #[tokio::test]
    async fn test_parse_error_returns_2_without_building_a_runner() {
        fn factory(_: RunnerConfig) -> Result<Box<dyn TestRunner>> {
            PARSE_ERR_RUNNERS.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CannedRunner { passed: true }))
        }
        let wiring = Wiring {
            arguments: UiArguments::factory,
            runner: factory,
        };

        // No test paths at all
        let code = Harness.cli(wiring, args(&["--verbose"])).await.unwrap();
        assert_eq!(code, 2);
        assert_eq!(PARSE_ERR_RUNNERS.load(Ordering::SeqCst), 0);
    }

    static HELP_RUNNERS: AtomicUsize = AtomicUsize::new(0);

    #[tokio::test]
    async fn test_help_returns_0_without_building_a_runner() {
        fn factory(_: RunnerConfig) -> Result<Box<dyn TestRunner>> {
            HELP_RUNNERS.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CannedRunner { passed: true }))
        }
        let wiring = Wiring {
            arguments: UiArguments::factory,
            runner: factory,
        };

        let code = Harness.cli(wiring, args(&["--help"])).await.unwrap();
        assert_eq!(code, 0);
        assert_eq!(HELP_RUNNERS.load(Ordering::SeqCst), 0);
    }

    static SEEN_CONFIG: Mutex<Option<(Vec<String>, bool)>> = Mutex::new(None);

    #[tokio::test]
    async fn test_runner_is_built_from_the_parsed_arguments() {
        fn factory(config: RunnerConfig) -> Result<Box<dyn TestRunner>> {
            let tests = config
                .base
                .tests
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            *SEEN_CONFIG.lock().unwrap() = Some((tests, config.base.verbose));
            Ok(Box::new(CannedRunner { passed: true }))
        }
        let wiring = Wiring {
            arguments: UiArguments::factory,
            runner: factory,
        };

        let dir = tempfile::tempdir().unwrap();
        let code = Harness
            .cli(
                wiring,
                args(&["--output", &output_flag(&dir), "-v", "t1", "t2"]),
            )
            .await
            .unwrap();
        assert_eq!(code, 0);

        let seen = SEEN_CONFIG.lock().unwrap().take().unwrap();
        assert_eq!(seen.0, vec!["t1".to_string(), "t2".to_string()]);
        assert!(seen.1);
    }

    #[tokio::test]
    async fn test_failed_summary_maps_to_exit_1() {
        fn factory(_: RunnerConfig) -> Result<Box<dyn TestRunner>> {
            Ok(Box::new(CannedRunner { passed: false }))
        }
        let wiring = Wiring {
            arguments: UiArguments::factory,
            runner: factory,
        };

        let dir = tempfile::tempdir().unwrap();
        let code = Harness
            .cli(wiring, args(&["--output", &output_flag(&dir), "t1"]))
            .await
            .unwrap();
        assert_eq!(code, 1);
    }

    static VERIFY_ERR_RUNNERS: AtomicUsize = AtomicUsize::new(0);

    #[tokio::test]
    async fn test_verify_failure_propagates_before_the_runner_exists() {
        fn factory(_: RunnerConfig) -> Result<Box<dyn TestRunner>> {
            VERIFY_ERR_RUNNERS.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CannedRunner { passed: true }))
        }
        let wiring = Wiring {
            arguments: UiArguments::factory,
            runner: factory,
        };

        let dir = tempfile::tempdir().unwrap();
        let err = Harness
            .cli(
                wiring,
                args(&[
                    "--output",
                    &output_flag(&dir),
                    "--binary",
                    "/no/such/firefox",
                    "t1",
                ]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(VERIFY_ERR_RUNNERS.load(Ordering::SeqCst), 0);
    }
}
