//! Database driver smoke test.
//!
//! Opens a connection with the interpreter's `sqlite3` driver, optionally
//! switches on extension loading, and reports the driver and library
//! versions. The probe closes the connection in a `finally` block so it is
//! released whether or not the connect succeeded.

use crate::error::Result;
use crate::runtime::{DatabaseTarget, Runtime};

use super::CheckReport;

/// Connect to `target` and report what the driver says.
pub fn check(
    runtime: &dyn Runtime,
    target: &DatabaseTarget,
    enable_extensions: bool,
) -> Result<CheckReport> {
    let mut report = CheckReport::new("sqlite");
    let outcome = runtime.sqlite(target, enable_extensions)?;

    if let Some(error) = &outcome.error {
        report.fail(error.clone());
    } else {
        report.info(format!("Connected to {}", target.connect_arg()));
        if let Some(version) = &outcome.driver_version {
            report.info(format!("sqlite3 driver version: {}", version));
        }
        match &outcome.library_version {
            Some(version) => report.info(format!("SQLite library version: {}", version)),
            None => report.fail("Driver did not report an SQLite library version"),
        }
        if enable_extensions && !outcome.extensions_enabled {
            report.fail("Extension loading was requested but not enabled");
        }
    }

    if !outcome.released {
        report.fail("Connection was not released");
    }

    Ok(report)
}
