//! Duplicate dist-info detection.
//!
//! An installer that upgrades a package without removing the old metadata
//! leaves two `<name>-<version>.dist-info` directories behind, and the
//! import system then sees whichever one sorts first. This check scans the
//! installation roots and flags any package with more than one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::error::Result;

use super::CheckReport;

/// Hidden directories are not metadata.
const SCAN_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Package name to every metadata directory found for it.
#[derive(Debug, Clone, Default)]
pub struct DistInfoIndex {
    entries: BTreeMap<String, Vec<PathBuf>>,
}

impl DistInfoIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `<root>/*.dist-info` under every root.
    ///
    /// Roots that do not exist contribute nothing. Entries that cannot be
    /// read are logged and skipped.
    pub fn scan<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let mut index = Self::new();
        for root in roots {
            let root = root.as_ref();
            let pattern = format!(
                "{}/*.dist-info",
                glob::Pattern::escape(&root.to_string_lossy())
            );
            tracing::debug!("Scanning {}", pattern);

            let paths = glob::glob_with(&pattern, SCAN_OPTIONS)
                .map_err(|e| anyhow!("invalid scan pattern {}: {}", pattern, e))?;
            for entry in paths {
                match entry {
                    Ok(path) => index.insert(path),
                    Err(e) => tracing::warn!(
                        "Skipping unreadable entry {}: {}",
                        e.path().display(),
                        e.error()
                    ),
                }
            }
        }
        Ok(index)
    }

    /// Record a metadata directory under its package name.
    pub fn insert(&mut self, path: PathBuf) {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return;
        };
        let name = package_name(&file_name).to_string();
        let paths = self.entries.entry(name).or_default();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    /// Number of distinct package names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no metadata directory was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths recorded for a package.
    pub fn paths(&self, name: &str) -> Option<&[PathBuf]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Packages with more than one metadata directory, in name order.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }
}

/// The leading package-name token of a dist-info directory name.
///
/// `requests-2.31.0.dist-info` → `requests`.
pub fn package_name(dir_name: &str) -> &str {
    dir_name.split('-').next().unwrap_or(dir_name)
}

/// Render paths the way the interpreter prints a list of strings.
fn format_paths(paths: &[PathBuf]) -> String {
    let quoted: Vec<String> = paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Scan `roots` and report every duplicated package.
pub fn check<P: AsRef<Path>>(roots: &[P]) -> Result<CheckReport> {
    let mut report = CheckReport::new("dist-info");
    let index = DistInfoIndex::scan(roots)?;

    report.info(format!(
        "Scanned {} root(s), found {} package(s)",
        roots.len(),
        index.len()
    ));

    for (name, paths) in index.duplicates() {
        report.fail(format!(
            "multiple dist-info found for {}: {}",
            name,
            format_paths(paths)
        ));
    }

    Ok(report)
}
