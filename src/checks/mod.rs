//! The installation checks.
//!
//! Each check is independent: it gathers what it needs from a
//! [`Runtime`](crate::runtime::Runtime) (or the filesystem), compares it
//! against its expectations and returns a [`CheckReport`]. A report with a
//! failure finding means the installation is wrong; an `Err` means the check
//! could not run at all.
//!
//! # Modules
//!
//! - [`dist_info`] - Duplicate dist-info detector
//! - [`build_config`] - Build/config validator
//! - [`stdlib`] - Standard-library completeness validator
//! - [`sqlite`] - Database driver smoke test
//! - [`fetch`] - Network fetch integrity check

pub mod build_config;
pub mod dist_info;
pub mod fetch;
pub mod sqlite;
pub mod stdlib;

/// How much a finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Progress or context, never affects the outcome.
    Info,
    /// A mismatch the active profile tolerates.
    Warning,
    /// A mismatch that fails the check.
    Failure,
}

/// A single observation made by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    /// Indented follow-up lines (e.g. one per missing module).
    pub details: Vec<String>,
}

/// Everything a check observed, in order.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Check name, for headers and logs.
    pub check: &'static str,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// Create an empty report.
    pub fn new(check: &'static str) -> Self {
        Self {
            check,
            findings: Vec::new(),
        }
    }

    /// Record an informational finding.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message.into(), Vec::new());
    }

    /// Record a tolerated mismatch.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into(), Vec::new());
    }

    /// Record a failing mismatch.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(Severity::Failure, message.into(), Vec::new());
    }

    /// Record a failing mismatch with detail lines.
    pub fn fail_with_details(&mut self, message: impl Into<String>, details: Vec<String>) {
        self.push(Severity::Failure, message.into(), details);
    }

    fn push(&mut self, severity: Severity, message: String, details: Vec<String>) {
        match severity {
            Severity::Info => tracing::debug!("[{}] {}", self.check, message),
            Severity::Warning => tracing::warn!("[{}] {}", self.check, message),
            Severity::Failure => tracing::debug!("[{}] failed: {}", self.check, message),
        }
        self.findings.push(Finding {
            severity,
            message,
            details,
        });
    }

    /// Whether no failure was recorded.
    pub fn passed(&self) -> bool {
        !self.has_failure()
    }

    /// Whether at least one failure was recorded.
    pub fn has_failure(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Failure)
    }

    /// Findings of the given severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Messages of all failure findings.
    pub fn failures(&self) -> Vec<&str> {
        self.with_severity(Severity::Failure)
            .map(|f| f.message.as_str())
            .collect()
    }

    /// Messages of all warning findings.
    pub fn warnings(&self) -> Vec<&str> {
        self.with_severity(Severity::Warning)
            .map(|f| f.message.as_str())
            .collect()
    }
}
