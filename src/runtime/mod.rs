//! The seam between checks and the interpreter under test.
//!
//! Checks never talk to an interpreter directly. They ask a [`Runtime`]
//! for facts, import results, a database driver report or an HTTP body
//! summary, which keeps every check testable against [`StaticRuntime`].
//!
//! # Modules
//!
//! - [`facts`] - Decoded probe documents
//! - [`python`] - Subprocess-backed runtime running embedded probe scripts
//! - [`mock`] - In-memory runtime for tests
//! - [`version`] - Version parsing and ordering

pub mod facts;
pub mod mock;
pub mod python;
pub mod version;

use std::path::PathBuf;

pub use facts::{ImportReport, RuntimeFacts, SqliteReport, UrlopenReport, VersionInfo};
pub use mock::StaticRuntime;
pub use python::{PythonRuntime, DEFAULT_INTERPRETER};
pub use version::RuntimeVersion;

use crate::error::Result;

/// Where the database smoke test connects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseTarget {
    /// An unnamed in-memory database.
    #[default]
    InMemory,
    /// A database file, created by the driver if absent.
    File(PathBuf),
}

impl DatabaseTarget {
    /// The argument handed to the driver's `connect`.
    pub fn connect_arg(&self) -> String {
        match self {
            Self::InMemory => ":memory:".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// A source of interpreter facts.
///
/// Implementations are opaque providers: they report what the interpreter
/// says and never judge it.
pub trait Runtime {
    /// Human-readable identity for log and error lines.
    fn describe(&self) -> String;

    /// OS, version, installation roots and build configuration variables.
    fn facts(&self) -> Result<RuntimeFacts>;

    /// Attempt to import each module; return the ones that failed.
    fn import_failures(&self, modules: &[String]) -> Result<Vec<String>>;

    /// Connect to `target` with the interpreter's database driver.
    fn sqlite(&self, target: &DatabaseTarget, enable_extensions: bool) -> Result<SqliteReport>;

    /// GET `url` with the interpreter's own HTTP stack.
    fn urlopen(&self, url: &str) -> Result<UrlopenReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_target_is_default() {
        assert_eq!(DatabaseTarget::default(), DatabaseTarget::InMemory);
        assert_eq!(DatabaseTarget::InMemory.connect_arg(), ":memory:");
    }

    #[test]
    fn file_target_passes_path() {
        let target = DatabaseTarget::File(PathBuf::from("/tmp/smoke.db"));
        assert_eq!(target.connect_arg(), "/tmp/smoke.db");
    }
}
