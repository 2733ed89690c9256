//! Runtime version parsing and ordering.
//!
//! Version strings arrive from CI harnesses in several shapes: `3.12.1`,
//! `3.9`, `3.13.0-beta.2`, `3.11.0rc1`. Only the numeric release triple
//! takes part in ordering; whatever trails it is kept for display.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, VerifyError};

/// Regex for the numeric release triple plus an optional trailing suffix.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(\S*)\s*$")
        .expect("VERSION_REGEX must compile")
});

/// A parsed runtime version.
#[derive(Debug, Clone, Eq)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Anything after the release triple (e.g. `-beta.2`, `rc1`).
    pub suffix: String,
}

impl RuntimeVersion {
    /// Create a release version with no suffix.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: String::new(),
        }
    }

    /// Parse version text, treating missing minor/patch components as 0.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || VerifyError::InvalidVersion {
            input: input.to_string(),
        };

        let caps = VERSION_REGEX.captures(input).ok_or_else(invalid)?;
        let component = |idx: usize| -> Result<u32> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            suffix: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// The `(major, minor)` pair used by version gates.
    pub fn major_minor(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    /// Whether this version is at least `major.minor`.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        self.major_minor() >= (major, minor)
    }

    fn release(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }
}

impl FromStr for RuntimeVersion {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.release() == other.release()
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release().cmp(&other.release())
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}",
            self.major, self.minor, self.patch, self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_release() {
        let v = RuntimeVersion::parse("3.12.1").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (3, 12, 1));
        assert!(v.suffix.is_empty());
    }

    #[test]
    fn parses_major_minor_only() {
        let v = RuntimeVersion::parse("3.9").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (3, 9, 0));
    }

    #[test]
    fn keeps_prerelease_suffix() {
        let v = RuntimeVersion::parse("3.13.0-beta.2").unwrap();
        assert_eq!(v.major_minor(), (3, 13));
        assert_eq!(v.suffix, "-beta.2");
        assert_eq!(v.to_string(), "3.13.0-beta.2");

        let v = RuntimeVersion::parse("3.11.0rc1").unwrap();
        assert_eq!(v.suffix, "rc1");
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!(
            RuntimeVersion::parse("latest"),
            Err(VerifyError::InvalidVersion { .. })
        ));
        assert!(RuntimeVersion::parse("").is_err());
    }

    #[test]
    fn orders_numerically_not_lexically() {
        let v3_10 = RuntimeVersion::parse("3.10.0").unwrap();
        let v3_9 = RuntimeVersion::parse("3.9.18").unwrap();
        assert!(v3_10 > v3_9);
    }

    #[test]
    fn orders_against_darwin_openssl_threshold() {
        let threshold = RuntimeVersion::new(3, 7, 0);
        assert!(RuntimeVersion::parse("3.6.15").unwrap() < threshold);
        assert!(RuntimeVersion::parse("3.7.0").unwrap() >= threshold);
        assert!(RuntimeVersion::parse("3.7").unwrap() >= threshold);
        assert!(RuntimeVersion::parse("2.7.18").unwrap() < threshold);
    }

    #[test]
    fn suffix_does_not_affect_equality() {
        assert_eq!(
            RuntimeVersion::parse("3.13.0-beta.2").unwrap(),
            RuntimeVersion::new(3, 13, 0)
        );
    }

    #[test]
    fn at_least_compares_major_minor() {
        let v = RuntimeVersion::parse("3.12.1").unwrap();
        assert!(v.at_least(3, 12));
        assert!(v.at_least(3, 5));
        assert!(!v.at_least(3, 13));
        assert!(!v.at_least(4, 0));
    }

    #[test]
    fn from_str_matches_parse() {
        let v: RuntimeVersion = "3.8.10".parse().unwrap();
        assert_eq!(v, RuntimeVersion::new(3, 8, 10));
    }
}
