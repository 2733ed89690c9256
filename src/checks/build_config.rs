//! Build/config validation.
//!
//! Compares the interpreter's build configuration variables against what
//! the toolchain that produced it should have set. Expectations are a pure
//! function of the OS, the requested version and the active [`Profile`];
//! see [`ConfigExpectation::derive`].
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `LIBDIR` location
//! 2. shared build and library extension
//! 3. OpenSSL flags (Darwin only)
//! 4. readline support

use clap::ValueEnum;

use crate::error::{Result, VerifyError};
use crate::runtime::{Runtime, RuntimeFacts, RuntimeVersion};

use super::CheckReport;

/// Include flag expected for the Homebrew OpenSSL on Darwin.
pub const OPENSSL_INCLUDES: &str = "-I/usr/local/opt/openssl@1.1/include";

/// Link flag expected for the Homebrew OpenSSL on Darwin.
pub const OPENSSL_LDFLAGS: &str = "-L/usr/local/opt/openssl@1.1/lib";

/// Native versions below this only carry OpenSSL in `LDFLAGS`.
pub fn openssl_vars_threshold() -> RuntimeVersion {
    RuntimeVersion::new(3, 7, 0)
}

/// Which generation of rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Every build comes from the tools directory and must be shared.
    Legacy,
    /// Darwin 3.11+ builds come from the framework installer, which may
    /// ship a static build and its own OpenSSL.
    Installer,
}

impl Profile {
    /// The profile implied by the positional arguments.
    ///
    /// Only the installer-aware variant ever took a native version.
    pub fn implied(native_version_given: bool) -> Self {
        if native_version_given {
            Self::Installer
        } else {
            Self::Legacy
        }
    }
}

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct ConfigRequest {
    /// Version text exactly as given; it becomes a path component.
    pub version: String,
    /// Version used for the OpenSSL threshold; defaults to `version`.
    pub native_version: Option<String>,
    pub profile: Profile,
    /// Root of the agent's tool cache (`AGENT_TOOLSDIRECTORY`).
    pub tools_directory: Option<String>,
    /// OS name to assume instead of the interpreter's `platform.system()`.
    pub os: Option<String>,
}

/// OpenSSL rules for Darwin builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpensslPolicy {
    /// `LDFLAGS` must contain this flag.
    LdflagsContain(&'static str),
    /// `OPENSSL_INCLUDES` / `OPENSSL_LDFLAGS` must equal these.
    Exact {
        includes: &'static str,
        ldflags: &'static str,
        /// Whether a mismatch fails the check or only warns.
        enforced: bool,
    },
}

/// Everything the validator expects of one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigExpectation {
    pub os: String,
    /// Whether the build came from the framework installer.
    pub installer: bool,
    pub lib_dir: String,
    /// `None` on an OS with no known shared-library extension.
    pub library_extension: Option<&'static str>,
    /// Whether a static build fails the check.
    pub shared_required: bool,
    /// `None` off Darwin.
    pub openssl: Option<OpensslPolicy>,
}

/// Shared-library extension for an OS name.
pub fn library_extension_for(os: &str) -> Option<&'static str> {
    match os {
        "Linux" => Some("so"),
        "Darwin" => Some("dylib"),
        _ => None,
    }
}

/// `LIBDIR` of a framework-installer build.
pub fn installer_lib_dir(major: u32, minor: u32) -> String {
    format!(
        "/Library/Frameworks/Python.framework/Versions/{}.{}/lib",
        major, minor
    )
}

/// `LIBDIR` of a tools-directory build.
pub fn tools_lib_dir(tools_directory: &str, version: &str) -> String {
    format!("{}/Python/{}/x64/lib", tools_directory, version)
}

impl ConfigExpectation {
    /// Derive expectations for `os` from the request.
    ///
    /// Deterministic: the same inputs always produce the same expectation.
    pub fn derive(os: &str, request: &ConfigRequest) -> Result<Self> {
        let version = RuntimeVersion::parse(&request.version)?;
        let native = match &request.native_version {
            Some(text) => RuntimeVersion::parse(text)?,
            None => version.clone(),
        };

        let installer =
            request.profile == Profile::Installer && os == "Darwin" && version.at_least(3, 11);

        let lib_dir = if installer {
            installer_lib_dir(version.major, version.minor)
        } else {
            let tools = request
                .tools_directory
                .as_deref()
                .ok_or_else(|| VerifyError::MissingSetting {
                    name: "AGENT_TOOLSDIRECTORY".to_string(),
                    hint: "set the variable or pass --tools-directory".to_string(),
                })?;
            tools_lib_dir(tools, &request.version)
        };

        let openssl = (os == "Darwin").then(|| {
            if native < openssl_vars_threshold() {
                OpensslPolicy::LdflagsContain(OPENSSL_LDFLAGS)
            } else {
                OpensslPolicy::Exact {
                    includes: OPENSSL_INCLUDES,
                    ldflags: OPENSSL_LDFLAGS,
                    enforced: !installer,
                }
            }
        });

        let expectation = Self {
            os: os.to_string(),
            installer,
            lib_dir,
            library_extension: library_extension_for(os),
            shared_required: !installer,
            openssl,
        };
        tracing::debug!("Derived expectation: {:?}", expectation);
        Ok(expectation)
    }

    /// Compare `facts` against this expectation.
    pub fn validate(&self, facts: &RuntimeFacts) -> CheckReport {
        let mut report = CheckReport::new("config");

        let lib_dir = display_var(facts, "LIBDIR");
        if lib_dir != self.lib_dir {
            report.fail(format!(
                "Invalid libraries location: {}; Expected: {}",
                lib_dir, self.lib_dir
            ));
            return report;
        }
        report.info(format!("Libraries location: {}", lib_dir));

        let ld_library = display_var(facts, "LDLIBRARY");
        if facts.config_truthy("Py_ENABLE_SHARED") {
            report.info(format!("{} was built with shared extensions", ld_library));

            let extension = ld_library.rsplit('.').next().unwrap_or_default();
            let expected = self.library_extension.unwrap_or("<unknown>");
            if self.library_extension != Some(extension) {
                report.fail(format!(
                    "Invalid extension: {}; Expected {}",
                    extension, expected
                ));
                return report;
            }
        } else if self.shared_required {
            report.fail(format!(
                "{} was built without shared extensions",
                ld_library
            ));
            return report;
        } else {
            report.warn(format!(
                "{} was built without shared extensions",
                ld_library
            ));
        }

        match &self.openssl {
            Some(OpensslPolicy::LdflagsContain(flag)) => {
                let ldflags = facts.config_str("LDFLAGS").unwrap_or_default();
                if !ldflags.contains(flag) {
                    report.fail(format!("Invalid ldflags: {}; Expected: {}", ldflags, flag));
                    return report;
                }
            }
            Some(OpensslPolicy::Exact {
                includes,
                ldflags,
                enforced,
            }) => {
                let pairs = [
                    ("openssl_includes", "OPENSSL_INCLUDES", *includes),
                    ("openssl_ldflags", "OPENSSL_LDFLAGS", *ldflags),
                ];
                for (label, var, expected) in pairs {
                    let actual = display_var(facts, var);
                    if actual == expected {
                        continue;
                    }
                    let message =
                        format!("Invalid {}: {}; Expected: {}", label, actual, expected);
                    if *enforced {
                        report.fail(message);
                        return report;
                    }
                    report.warn(message);
                }
            }
            None => {}
        }

        if !facts.config_truthy("HAVE_LIBREADLINE") {
            report.fail("Missing libreadline");
        }

        report
    }
}

/// A config variable as text, `None` when unset.
fn display_var(facts: &RuntimeFacts, name: &str) -> String {
    facts
        .config_str(name)
        .unwrap_or_else(|| "None".to_string())
}

/// Read the interpreter's configuration and validate it.
pub fn check(runtime: &dyn Runtime, request: &ConfigRequest) -> Result<CheckReport> {
    let facts = runtime.facts()?;
    let os = request.os.clone().unwrap_or_else(|| facts.os.clone());
    let expectation = ConfigExpectation::derive(&os, request)?;
    Ok(expectation.validate(&facts))
}
