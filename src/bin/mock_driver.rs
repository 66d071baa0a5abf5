//! Mock Marionette driver binary for integration testing
//!
//! Stands in for the real test driver so harness runs can be exercised
//! without a browser. Controlled by environment variables:
//!
//! - `MOCK_DRIVER_CAPTURE`: append the received argv to this file, one
//!   argument per line, each invocation preceded by a delimiter
//! - `MOCK_DRIVER_GECKO_LINES`: append these lines to the path given
//!   after `--gecko-log`, simulating browser log output
//! - `MOCK_DRIVER_SLEEP_SECS`: sleep this long before exiting,
//!   simulating a long-running suite
//! - `MOCK_DRIVER_EXIT`: exit with this code (default 0)

use std::env;
use std::fs::OpenOptions;
use std::io::Write;

const INVOCATION_DELIMITER: &str = "--- invocation ---";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if let Ok(capture_path) = env::var("MOCK_DRIVER_CAPTURE") {
        let mut record = String::from(INVOCATION_DELIMITER);
        record.push('\n');
        for arg in &args {
            record.push_str(arg);
            record.push('\n');
        }

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&capture_path)
            .and_then(|mut f| f.write_all(record.as_bytes()));
        if let Err(e) = result {
            eprintln!("mock-driver: failed to write capture file: {}", e);
            std::process::exit(70);
        }
    }

    if let Ok(lines) = env::var("MOCK_DRIVER_GECKO_LINES") {
        let gecko_log = args
            .iter()
            .position(|a| a == "--gecko-log")
            .and_then(|pos| args.get(pos + 1));

        if let Some(path) = gecko_log {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut f| {
                    f.write_all(lines.as_bytes())?;
                    f.write_all(b"\n")
                });
            if let Err(e) = result {
                eprintln!("mock-driver: failed to write gecko log: {}", e);
                std::process::exit(70);
            }
        }
    }

    if let Some(secs) = env::var("MOCK_DRIVER_SLEEP_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        std::thread::sleep(std::time::Duration::from_secs(secs));
    }

    let code = env::var("MOCK_DRIVER_EXIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    std::process::exit(code);
}
