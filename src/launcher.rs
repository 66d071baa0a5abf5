//! UI test launcher
//!
//! Pure composition: wires the browser-UI extensions into the harness
//! entry point and delegates. No flags, output, or exit-code semantics
//! of its own.

use crate::common::Result;
use crate::harness::{Entry, Harness, UiArguments, UiTestRunner, Wiring};

/// The browser-UI wiring: argument and runner extensions
pub fn wiring() -> Wiring {
    Wiring {
        arguments: UiArguments::factory,
        runner: UiTestRunner::factory,
    }
}

/// Launch the suite through an arbitrary entry point
///
/// `args` is passed through untouched; `None` means the entry should
/// use the process arguments.
pub async fn run_with<E: Entry + ?Sized>(
    entry: &E,
    args: Option<Vec<String>>,
) -> Result<i32> {
    entry.cli(wiring(), args).await
}

/// Launch the suite through the production harness
pub async fn cli(args: Option<Vec<String>>) -> Result<i32> {
    run_with(&Harness, args).await
}
