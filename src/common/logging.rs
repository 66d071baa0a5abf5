//! Logging and tracing configuration
//!
//! Both binaries log to stderr: stdout of `check-gecko-log` is a
//! machine-read surface that must carry nothing but error lines.
//! The harness additionally logs to a file in its output directory.

use std::path::{Path, PathBuf};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing for the log checker CLI (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies.
pub fn init_cli() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gecko_qa=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

/// Initialize tracing for the test harness (file + stderr logging)
///
/// The harness logs to both:
/// 1. `<output_dir>/harness.log` with full details
/// 2. stderr, compact, for the terminal
///
/// Log level controlled by `RUST_LOG`; `verbose` raises the default to
/// DEBUG for this crate. Runs after argument parsing, so initialization
/// is tolerant of an already-installed subscriber.
pub fn init_harness(output_dir: &Path, verbose: bool) -> Option<PathBuf> {
    let default = if verbose {
        "gecko_qa=debug,info"
    } else {
        "gecko_qa=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if std::fs::create_dir_all(output_dir).is_ok() {
        let log_file = output_dir.join("harness.log");

        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true);

                let stderr_layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .compact();

                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .with(stderr_layer)
                    .try_init();

                return Some(log_file);
            }
            Err(e) => {
                eprintln!("Warning: Could not open harness log file: {}", e);
            }
        }
    }

    // Fallback: stderr only
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init();

    None
}
