//! Error types for pyverify operations.
//!
//! This module defines [`VerifyError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A check that runs to completion and finds a mismatch is *not* an error;
//!   it reports through the UI and returns a failing
//!   [`CommandResult`](crate::cli::CommandResult)
//! - `VerifyError` covers everything that stops a check from running at all
//! - Use `anyhow::Error` (via `VerifyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pyverify operations.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The interpreter binary could not be started.
    #[error("Failed to launch interpreter '{interpreter}': {message}")]
    InterpreterLaunch {
        interpreter: PathBuf,
        message: String,
    },

    /// A probe script exited unsuccessfully.
    #[error("Interpreter probe '{probe}' failed with exit code {code:?}: {stderr}")]
    ProbeFailed {
        probe: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A probe script produced output that is not the expected JSON document.
    #[error("Malformed output from probe '{probe}': {message}")]
    ProbeOutput { probe: String, message: String },

    /// Settings file not found at the requested location.
    #[error("Settings file not found: {path}")]
    SettingsNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    /// A version string could not be understood.
    #[error("Invalid version '{input}': expected <major>.<minor>[.<patch>]")]
    InvalidVersion { input: String },

    /// A value the check needs was not provided by flag, environment or settings.
    #[error("{name} is not set: {hint}")]
    MissingSetting { name: String, hint: String },

    /// The fetch itself failed (connection, TLS, HTTP status).
    #[error("Fetching {url} failed: {message}")]
    FetchFailed { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pyverify operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
