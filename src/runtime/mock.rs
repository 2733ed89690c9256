//! In-memory runtime for testing.
//!
//! `StaticRuntime` implements the `Runtime` trait from canned facts and
//! records every module list it is asked to import.
//!
//! # Example
//!
//! ```
//! use pyverify::runtime::{Runtime, StaticRuntime};
//!
//! let runtime = StaticRuntime::linux("3.12.1").with_missing(&["tkinter"]);
//! let failed = runtime
//!     .import_failures(&["os".to_string(), "tkinter".to_string()])
//!     .unwrap();
//! assert_eq!(failed, vec!["tkinter".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::error::{Result, VerifyError};

use super::facts::{RuntimeFacts, SqliteReport, UrlopenReport, VersionInfo};
use super::version::RuntimeVersion;
use super::{DatabaseTarget, Runtime};

/// Runtime answering from canned data.
#[derive(Debug)]
pub struct StaticRuntime {
    facts: RuntimeFacts,
    missing: HashSet<String>,
    sqlite: SqliteReport,
    urlopen: UrlopenReport,
    imported: RefCell<Vec<String>>,
    connections: RefCell<Vec<(DatabaseTarget, bool)>>,
}

impl StaticRuntime {
    /// Create a runtime reporting the given facts.
    pub fn new(facts: RuntimeFacts) -> Self {
        Self {
            facts,
            missing: HashSet::new(),
            sqlite: SqliteReport {
                library_version: Some("3.45.1".to_string()),
                released: true,
                ..Default::default()
            },
            urlopen: UrlopenReport::default(),
            imported: RefCell::new(Vec::new()),
            connections: RefCell::new(Vec::new()),
        }
    }

    /// A runtime on `os` at `version`, with no config vars and no site roots.
    ///
    /// # Panics
    ///
    /// Panics if `version` does not parse; this is a test helper.
    pub fn with_os(os: &str, version: &str) -> Self {
        let v = RuntimeVersion::parse(version).unwrap_or_else(|e| panic!("{}", e));
        Self::new(RuntimeFacts {
            os: os.to_string(),
            version: VersionInfo {
                major: v.major,
                minor: v.minor,
                micro: v.patch,
                releaselevel: "final".to_string(),
                serial: 0,
            },
            purelib: None,
            platlib: None,
            config_vars: HashMap::new(),
        })
    }

    /// A Linux runtime at `version`.
    pub fn linux(version: &str) -> Self {
        Self::with_os("Linux", version)
    }

    /// A Darwin runtime at `version`.
    pub fn darwin(version: &str) -> Self {
        Self::with_os("Darwin", version)
    }

    /// Set a configuration variable.
    pub fn with_config_var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.facts.config_vars.insert(name.to_string(), value.into());
        self
    }

    /// Set both installation roots.
    pub fn with_site_roots(mut self, purelib: &str, platlib: &str) -> Self {
        self.facts.purelib = Some(purelib.to_string());
        self.facts.platlib = Some(platlib.to_string());
        self
    }

    /// Mark modules as failing to import.
    pub fn with_missing(mut self, modules: &[&str]) -> Self {
        self.missing.extend(modules.iter().map(|m| m.to_string()));
        self
    }

    /// Replace the database driver report.
    pub fn with_sqlite(mut self, report: SqliteReport) -> Self {
        self.sqlite = report;
        self
    }

    /// Replace the HTTP GET report.
    pub fn with_urlopen(mut self, report: UrlopenReport) -> Self {
        self.urlopen = report;
        self
    }

    /// Every module name passed to `import_failures`, in order.
    pub fn imported(&self) -> Vec<String> {
        self.imported.borrow().clone()
    }

    /// Every `(target, enable_extensions)` passed to `sqlite`.
    pub fn connections(&self) -> Vec<(DatabaseTarget, bool)> {
        self.connections.borrow().clone()
    }
}

impl Runtime for StaticRuntime {
    fn describe(&self) -> String {
        let v = &self.facts.version;
        format!("static {} {}.{}.{}", self.facts.os, v.major, v.minor, v.micro)
    }

    fn facts(&self) -> Result<RuntimeFacts> {
        Ok(self.facts.clone())
    }

    fn import_failures(&self, modules: &[String]) -> Result<Vec<String>> {
        self.imported.borrow_mut().extend(modules.iter().cloned());
        Ok(modules
            .iter()
            .filter(|m| self.missing.contains(*m))
            .cloned()
            .collect())
    }

    fn sqlite(&self, target: &DatabaseTarget, enable_extensions: bool) -> Result<SqliteReport> {
        self.connections
            .borrow_mut()
            .push((target.clone(), enable_extensions));
        let mut report = self.sqlite.clone();
        report.extensions_enabled = enable_extensions && report.error.is_none();
        Ok(report)
    }

    fn urlopen(&self, url: &str) -> Result<UrlopenReport> {
        if url.is_empty() {
            return Err(VerifyError::FetchFailed {
                url: url.to_string(),
                message: "empty URL".to_string(),
            });
        }
        Ok(self.urlopen.clone())
    }
}
