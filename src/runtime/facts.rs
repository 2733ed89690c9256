//! Facts reported by the interpreter's probe scripts.
//!
//! Each type here is the decoded JSON document one probe prints on stdout.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::version::RuntimeVersion;

/// Configuration variables the build/config validator reads.
pub const CONFIG_VARS: &[&str] = &[
    "LIBDIR",
    "LDLIBRARY",
    "Py_ENABLE_SHARED",
    "HAVE_LIBREADLINE",
    "LDFLAGS",
    "OPENSSL_INCLUDES",
    "OPENSSL_LDFLAGS",
];

/// `sys.version_info`, field for field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    #[serde(default = "default_releaselevel")]
    pub releaselevel: String,
    #[serde(default)]
    pub serial: u32,
}

fn default_releaselevel() -> String {
    "final".to_string()
}

impl VersionInfo {
    /// The running interpreter's version as a [`RuntimeVersion`].
    pub fn to_runtime_version(&self) -> RuntimeVersion {
        RuntimeVersion::new(self.major, self.minor, self.micro)
    }
}

/// Installation facts gathered by the introspection probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeFacts {
    /// `platform.system()`: `Linux`, `Darwin`, `Windows`, ...
    pub os: String,
    pub version: VersionInfo,
    pub purelib: Option<String>,
    pub platlib: Option<String>,
    /// Raw `sysconfig.get_config_var` results; absent variables decode as `null`.
    #[serde(default)]
    pub config_vars: HashMap<String, Value>,
}

impl RuntimeFacts {
    /// Distinct installation roots (`purelib`, `platlib`) in that order.
    pub fn site_roots(&self) -> Vec<String> {
        let mut roots: Vec<String> = Vec::new();
        for root in [&self.purelib, &self.platlib].into_iter().flatten() {
            if !roots.contains(root) {
                roots.push(root.clone());
            }
        }
        roots
    }

    /// A config variable rendered as text, the way `'%s' % value` would.
    ///
    /// Returns `None` when the variable is unset.
    pub fn config_str(&self, name: &str) -> Option<String> {
        match self.config_vars.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Interpreter truthiness of a config variable.
    pub fn config_truthy(&self, name: &str) -> bool {
        self.config_vars.get(name).map(is_truthy).unwrap_or(false)
    }
}

/// Python truthiness for a decoded JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Result of the import probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Modules whose import raised, in request order.
    pub missing: Vec<String>,
}

/// Result of the database driver probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqliteReport {
    /// Driver module version (`sqlite3.version`), gone in newer interpreters.
    pub driver_version: Option<String>,
    /// Linked SQLite library version (`sqlite3.sqlite_version`).
    pub library_version: Option<String>,
    /// Whether extension loading was switched on.
    #[serde(default)]
    pub extensions_enabled: bool,
    /// Whether the connection was closed before the probe exited.
    #[serde(default)]
    pub released: bool,
    /// Connect failure text, if any.
    pub error: Option<String>,
}

/// Result of an HTTP GET performed by the interpreter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlopenReport {
    pub status: Option<u16>,
    pub length: Option<usize>,
    pub sha256: Option<String>,
    pub error: Option<String>,
}
