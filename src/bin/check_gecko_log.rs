//! Check a Gecko logfile for errors
//!
//! Exits 0 when the log is clean, 1 when unexpected error lines exist,
//! 2 on usage errors or an unreadable file. CI pipelines key off the
//! exit code; `--print` additionally emits the offending lines.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use gecko_qa::common::logging;
use gecko_qa::{check, GeckoLogParser};

#[derive(Parser)]
#[command(name = "check-gecko-log", about = "Check a Gecko logfile for errors")]
#[command(version, long_about = None)]
struct Cli {
    /// Print error lines
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Path to the gecko log
    file: PathBuf,
}

fn main() {
    logging::init_cli();

    // A missing file argument fails here, before any parser exists
    let cli = Cli::parse();

    let parser = GeckoLogParser::new(&cli.file);
    let mut stdout = std::io::stdout().lock();

    // A flush failure means printed error lines were lost; that must
    // not look like a clean run.
    let result = check::run(&parser, cli.print, &mut stdout).and_then(|report| {
        stdout.flush()?;
        Ok(report)
    });

    match result {
        Ok(report) => std::process::exit(if report.passed() { 0 } else { 1 }),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
