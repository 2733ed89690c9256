//! Network fetch integrity check.
//!
//! Downloads a file pinned to an immutable commit and checks its size (and
//! optionally its SHA-256). Because the content can never change, any
//! difference points at the HTTP/TLS stack doing the download.
//!
//! Two fetchers are available:
//! - [`InterpreterFetcher`] uses the interpreter's own `urlopen`, which is
//!   what the check is really about: a runtime whose `ssl` module is broken
//!   fails here.
//! - [`HttpFetcher`] uses `reqwest` from this process, useful to tell a
//!   broken runtime apart from a broken network.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use crate::error::{Result, VerifyError};
use crate::runtime::Runtime;

use super::CheckReport;

/// A `.gitignore` pinned to a fixed commit of the python-versions repository.
pub const PINNED_URL: &str = "https://raw.githubusercontent.com/actions/python-versions/c641695f6a07526c18f10e374e503e649fef9427/.gitignore";

/// Byte length of [`PINNED_URL`].
pub const PINNED_LENGTH: usize = 140;

/// Which HTTP stack performs the GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FetchVia {
    /// The interpreter under test.
    #[default]
    Interpreter,
    /// This process.
    Native,
}

/// What a fetched body must look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchExpectation {
    pub url: String,
    pub length: usize,
    /// Lowercase hex SHA-256 of the body, when pinned.
    pub sha256: Option<String>,
}

impl Default for FetchExpectation {
    fn default() -> Self {
        Self {
            url: PINNED_URL.to_string(),
            length: PINNED_LENGTH,
            sha256: None,
        }
    }
}

/// Summary of a downloaded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub status: u16,
    pub length: usize,
    pub sha256: String,
}

impl FetchedBody {
    /// Summarize raw body bytes.
    pub fn from_bytes(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            length: body.len(),
            sha256: hex::encode(Sha256::digest(body)),
        }
    }
}

/// Something that can GET a URL.
pub trait Fetcher {
    /// Name for log lines.
    fn name(&self) -> &'static str;

    /// Perform the GET and read the whole body.
    ///
    /// Non-success statuses are errors.
    fn fetch(&self, url: &str) -> Result<FetchedBody>;
}

/// Fetches over HTTP/HTTPS with `reqwest`.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pyverify/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "native"
    }

    fn fetch(&self, url: &str) -> Result<FetchedBody> {
        let failed = |message: String| VerifyError::FetchFailed {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status)));
        }

        let body = response.bytes().map_err(|e| failed(e.to_string()))?;
        Ok(FetchedBody::from_bytes(status.as_u16(), &body))
    }
}

/// Fetches with the interpreter's `urlopen`.
pub struct InterpreterFetcher<'a> {
    runtime: &'a dyn Runtime,
}

impl<'a> InterpreterFetcher<'a> {
    pub fn new(runtime: &'a dyn Runtime) -> Self {
        Self { runtime }
    }
}

impl Fetcher for InterpreterFetcher<'_> {
    fn name(&self) -> &'static str {
        "interpreter"
    }

    fn fetch(&self, url: &str) -> Result<FetchedBody> {
        let failed = |message: String| VerifyError::FetchFailed {
            url: url.to_string(),
            message,
        };

        let report = self.runtime.urlopen(url)?;
        if let Some(error) = report.error {
            return Err(failed(error));
        }

        let status = report.status.unwrap_or(200);
        if !(200..300).contains(&status) {
            return Err(failed(format!("HTTP {}", status)));
        }

        match (report.length, report.sha256) {
            (Some(length), Some(sha256)) => Ok(FetchedBody {
                status,
                length,
                sha256,
            }),
            _ => Err(failed("interpreter reported no body".to_string())),
        }
    }
}

/// Fetch the expected URL and compare the body.
pub fn check(fetcher: &dyn Fetcher, expected: &FetchExpectation) -> Result<CheckReport> {
    let mut report = CheckReport::new("fetch");
    tracing::debug!("Fetching {} via {}", expected.url, fetcher.name());

    let body = fetcher.fetch(&expected.url)?;
    report.info(format!(
        "Fetched {} bytes from {} (HTTP {}, via {})",
        body.length,
        expected.url,
        body.status,
        fetcher.name()
    ));

    if body.length != expected.length {
        report.fail(format!(
            "Unexpected body length: {}; Expected: {}",
            body.length, expected.length
        ));
    }

    if let Some(sha256) = &expected.sha256 {
        if !body.sha256.eq_ignore_ascii_case(sha256) {
            report.fail(format!(
                "Unexpected body sha256: {}; Expected: {}",
                body.sha256, sha256
            ));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{StaticRuntime, UrlopenReport};
    use httpmock::prelude::*;

    const BODY: &str = "# pinned fixture body\n";

    fn expectation(url: String, length: usize) -> FetchExpectation {
        FetchExpectation {
            url,
            length,
            sha256: None,
        }
    }

    #[test]
    fn default_expectation_is_the_pinned_file() {
        let exp = FetchExpectation::default();
        assert_eq!(exp.length, 140);
        assert!(exp.url.contains("c641695f6a07526c18f10e374e503e649fef9427"));
        assert!(exp.sha256.is_none());
    }

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = HttpFetcher::new().unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn body_summary_hashes_content() {
        let body = FetchedBody::from_bytes(200, b"abc");
        assert_eq!(body.length, 3);
        assert_eq!(
            body.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn native_fetch_with_matching_length_passes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/.gitignore");
            then.status(200).body(BODY);
        });

        let fetcher = HttpFetcher::new().unwrap();
        let report = check(&fetcher, &expectation(server.url("/.gitignore"), BODY.len())).unwrap();

        mock.assert();
        assert!(report.passed(), "{:?}", report.findings);
    }

    #[test]
    fn native_fetch_with_wrong_length_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/.gitignore");
            then.status(200).body(BODY);
        });

        let fetcher = HttpFetcher::new().unwrap();
        let report = check(&fetcher, &expectation(server.url("/.gitignore"), 140)).unwrap();

        assert_eq!(
            report.failures(),
            vec![format!("Unexpected body length: {}; Expected: 140", BODY.len()).as_str()]
        );
    }

    #[test]
    fn native_fetch_http_error_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let fetcher = HttpFetcher::new().unwrap();
        let err = check(&fetcher, &expectation(server.url("/missing"), 140)).unwrap_err();
        assert!(matches!(err, VerifyError::FetchFailed { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn sha256_mismatch_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/.gitignore");
            then.status(200).body("abc");
        });

        let fetcher = HttpFetcher::new().unwrap();
        let mut exp = expectation(server.url("/.gitignore"), 3);
        exp.sha256 = Some("00".repeat(32));
        let report = check(&fetcher, &exp).unwrap();
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].starts_with("Unexpected body sha256:"));

        exp.sha256 =
            Some("BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD".to_string());
        assert!(check(&fetcher, &exp).unwrap().passed());
    }

    #[test]
    fn interpreter_fetch_uses_runtime_report() {
        let runtime = StaticRuntime::linux("3.12.1").with_urlopen(UrlopenReport {
            status: Some(200),
            length: Some(140),
            sha256: Some("ab".repeat(32)),
            error: None,
        });
        let fetcher = InterpreterFetcher::new(&runtime);
        let report = check(&fetcher, &FetchExpectation::default()).unwrap();
        assert!(report.passed());
        assert!(report.findings[0].message.contains("via interpreter"));
    }

    #[test]
    fn interpreter_fetch_error_is_an_error() {
        let runtime = StaticRuntime::linux("3.12.1").with_urlopen(UrlopenReport {
            error: Some("URLError: <urlopen error [SSL: CERTIFICATE_VERIFY_FAILED]>".to_string()),
            ..Default::default()
        });
        let fetcher = InterpreterFetcher::new(&runtime);
        let err = check(&fetcher, &FetchExpectation::default()).unwrap_err();
        assert!(err.to_string().contains("CERTIFICATE_VERIFY_FAILED"));
    }

    #[test]
    fn interpreter_short_body_fails() {
        let runtime = StaticRuntime::linux("3.12.1").with_urlopen(UrlopenReport {
            status: Some(200),
            length: Some(139),
            sha256: Some("ab".repeat(32)),
            error: None,
        });
        let fetcher = InterpreterFetcher::new(&runtime);
        let report = check(&fetcher, &FetchExpectation::default()).unwrap();
        assert_eq!(
            report.failures(),
            vec!["Unexpected body length: 139; Expected: 140"]
        );
    }
}
