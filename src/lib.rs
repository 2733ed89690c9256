//! pyverify - Smoke tests for an installed Python runtime.
//!
//! pyverify checks that a Python installation on a build agent looks the way
//! it should: no package installed twice, libraries where they belong, a
//! complete standard library, a working `sqlite3` driver and a TLS stack
//! that downloads files intact. Each check drives the interpreter under test
//! through small embedded probe scripts.
//!
//! # Modules
//!
//! - [`checks`] - The five checks and their reports
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional YAML settings
//! - [`error`] - Error types and result aliases
//! - [`runtime`] - The interpreter seam and its test double
//! - [`ui`] - Console output
//!
//! # Example
//!
//! ```
//! use pyverify::checks::stdlib::ExpectedModuleSet;
//! use pyverify::runtime::RuntimeVersion;
//!
//! let version = RuntimeVersion::parse("3.12.1").unwrap();
//! let expected = ExpectedModuleSet::for_version(&version, None, &[]);
//! assert!(expected.contains("typing"));
//! assert!(!expected.contains("distutils"));
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod runtime;
pub mod ui;

pub use error::{Result, VerifyError};
