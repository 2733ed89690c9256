//! Subprocess-backed [`Runtime`] for a real interpreter.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::error::{Result, VerifyError};

use super::facts::{ImportReport, RuntimeFacts, SqliteReport, UrlopenReport, CONFIG_VARS};
use super::{DatabaseTarget, Runtime};

/// Default interpreter looked up on PATH.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Timeout handed to the interpreter's `urlopen`.
const URLOPEN_TIMEOUT: Duration = Duration::from_secs(30);

/// An embedded probe script.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub name: &'static str,
    pub source: &'static str,
}

pub const INTROSPECT: Probe = Probe {
    name: "introspect",
    source: include_str!("probes/introspect.py"),
};

pub const IMPORT_MODULES: Probe = Probe {
    name: "import_modules",
    source: include_str!("probes/import_modules.py"),
};

pub const SQLITE: Probe = Probe {
    name: "sqlite",
    source: include_str!("probes/sqlite.py"),
};

pub const URLOPEN: Probe = Probe {
    name: "urlopen",
    source: include_str!("probes/urlopen.py"),
};

/// Runs probe scripts in a separate interpreter process.
#[derive(Debug, Clone)]
pub struct PythonRuntime {
    interpreter: PathBuf,
}

impl PythonRuntime {
    /// Create a runtime for the given interpreter path or PATH-relative name.
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Get the interpreter path.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Run a probe with `-c` and decode the JSON document it prints.
    pub fn run_probe<T: DeserializeOwned>(&self, probe: Probe, args: &[String]) -> Result<T> {
        let start = Instant::now();
        tracing::debug!(
            "Running probe '{}' with {} ({} args)",
            probe.name,
            self.interpreter.display(),
            args.len()
        );

        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(probe.source)
            .args(args)
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VerifyError::InterpreterLaunch {
                interpreter: self.interpreter.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            "Probe '{}' exited with {:?} after {:?}",
            probe.name,
            output.status.code(),
            start.elapsed()
        );

        if !output.status.success() {
            return Err(VerifyError::ProbeFailed {
                probe: probe.name.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_probe_output(probe.name, &String::from_utf8_lossy(&output.stdout))
    }
}

impl Default for PythonRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl Runtime for PythonRuntime {
    fn describe(&self) -> String {
        self.interpreter.display().to_string()
    }

    fn facts(&self) -> Result<RuntimeFacts> {
        let names: Vec<String> = CONFIG_VARS.iter().map(|s| s.to_string()).collect();
        self.run_probe(INTROSPECT, &names)
    }

    fn import_failures(&self, modules: &[String]) -> Result<Vec<String>> {
        let report: ImportReport = self.run_probe(IMPORT_MODULES, modules)?;
        Ok(report.missing)
    }

    fn sqlite(&self, target: &DatabaseTarget, enable_extensions: bool) -> Result<SqliteReport> {
        let args = vec![
            target.connect_arg(),
            if enable_extensions { "1" } else { "0" }.to_string(),
        ];
        self.run_probe(SQLITE, &args)
    }

    fn urlopen(&self, url: &str) -> Result<UrlopenReport> {
        let args = vec![url.to_string(), URLOPEN_TIMEOUT.as_secs().to_string()];
        self.run_probe(URLOPEN, &args)
    }
}

/// Decode the last non-empty stdout line as the probe's JSON document.
///
/// Site customizations occasionally print banners before the probe runs.
pub fn parse_probe_output<T: DeserializeOwned>(probe: &str, stdout: &str) -> Result<T> {
    let line = stdout
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| VerifyError::ProbeOutput {
            probe: probe.to_string(),
            message: "no output".to_string(),
        })?;

    serde_json::from_str(line.trim()).map_err(|e| VerifyError::ProbeOutput {
        probe: probe.to_string(),
        message: e.to_string(),
    })
}
