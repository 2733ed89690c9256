//! Standard-library completeness validation.
//!
//! Source builds silently drop modules whose system headers were missing at
//! configure time (`_ssl`, `readline`, `_tkinter`, `lzma`, ...). This check
//! imports every module the standard library should contain for the running
//! version and reports the ones that fail.
//!
//! The expected set drifts with the version. Rather than nesting version
//! conditionals, the drift is a table of [`VersionGate`]s applied in
//! ascending order to the Python 3.0 baseline.

use crate::error::Result;
use crate::runtime::{Runtime, RuntimeVersion};

use super::CheckReport;

/// The standard library as of Python 3.0.
pub const BASELINE: &[&str] = &[
    "abc", "aifc", "antigravity", "argparse", "ast", "asynchat", "asyncore", "base64", "bdb",
    "binhex", "bisect", "bz2", "cProfile", "calendar", "cgi", "cgitb", "chunk", "cmd", "code",
    "codecs", "codeop", "collections", "colorsys", "compileall", "configparser", "contextlib",
    "copy", "copyreg", "crypt", "csv", "ctypes", "curses", "datetime", "dbm", "decimal",
    "difflib", "dis", "distutils", "doctest", "dummy_threading", "email", "encodings", "filecmp",
    "fileinput", "fnmatch", "formatter", "fractions", "ftplib", "functools", "genericpath",
    "getopt", "getpass", "gettext", "glob", "gzip", "hashlib", "heapq", "hmac", "html", "http",
    "idlelib", "imaplib", "imghdr", "imp", "importlib", "inspect", "io", "json", "keyword",
    "lib2to3", "linecache", "locale", "logging", "macpath", "mailbox", "mailcap", "mimetypes",
    "modulefinder", "multiprocessing", "netrc", "nntplib", "ntpath", "nturl2path", "numbers",
    "opcode", "operator", "optparse", "os", "pdb", "pickle", "pickletools", "pipes", "pkgutil",
    "platform", "plistlib", "poplib", "posixpath", "pprint", "profile", "pstats", "pty",
    "py_compile", "pyclbr", "pydoc", "pydoc_data", "queue", "quopri", "random", "re", "readline",
    "reprlib", "rlcompleter", "runpy", "sched", "shelve", "shlex", "shutil", "signal", "site",
    "smtpd", "smtplib", "sndhdr", "socket", "socketserver", "sqlite3", "sre_compile",
    "sre_constants", "sre_parse", "ssl", "_ssl", "stat", "string", "stringprep", "struct",
    "subprocess", "sunau", "symbol", "symtable", "sysconfig", "tabnanny", "tarfile", "telnetlib",
    "tempfile", "test", "textwrap", "this", "threading", "timeit", "tkinter", "token", "tokenize",
    "trace", "traceback", "tty", "turtle", "turtledemo", "types", "unittest", "urllib", "uu",
    "uuid", "warnings", "wave", "weakref", "webbrowser", "wsgiref", "xdrlib", "xml", "xmlrpc",
    "zipfile",
];

/// Python 3 names and the Python 2 modules they replaced.
pub const PY2_RENAMES: &[(&str, &str)] = &[
    ("configparser", "ConfigParser"),
    ("copyreg", "copy_reg"),
    ("html", "HTMLParser"),
    ("http", "httplib"),
    ("queue", "Queue"),
    ("reprlib", "repr"),
    ("socketserver", "SocketServer"),
    ("xmlrpc", "xmlrpclib"),
    ("tkinter", "Tkinter"),
];

/// Easter eggs and demos that are not worth importing.
pub const EXCLUDED: &[&str] = &["antigravity", "this", "turtledemo"];

/// A change to the expected set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOp {
    Insert(&'static [&'static str]),
    Remove(&'static [&'static str]),
}

/// A change that applies from `since` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    pub since: (u32, u32),
    pub op: GateOp,
}

const fn insert(major: u32, minor: u32, names: &'static [&'static str]) -> VersionGate {
    VersionGate {
        since: (major, minor),
        op: GateOp::Insert(names),
    }
}

const fn remove(major: u32, minor: u32, names: &'static [&'static str]) -> VersionGate {
    VersionGate {
        since: (major, minor),
        op: GateOp::Remove(names),
    }
}

/// Every gate, in ascending `since` order.
///
/// See <https://docs.python.org/3/whatsnew/index.html>.
pub const GATES: &[VersionGate] = &[
    insert(3, 2, &["concurrent"]),
    insert(3, 3, &["ipaddress", "faulthandler", "lzma", "venv"]),
    insert(
        3,
        4,
        &["asyncio", "ensurepip", "enum", "pathlib", "selectors", "statistics", "tracemalloc"],
    ),
    insert(3, 5, &["typing", "zipapp"]),
    insert(3, 6, &["secrets"]),
    insert(3, 7, &["contextvars", "dataclasses"]),
    remove(3, 8, &["macpath"]),
    remove(3, 9, &["dummy_threading"]),
    insert(3, 9, &["graphlib", "zoneinfo"]),
    remove(3, 10, &["symbol", "formatter"]),
    remove(3, 11, &["binhex"]),
    insert(3, 11, &["tomllib"]),
    remove(3, 12, &["distutils", "imp", "smtpd", "asyncore", "asynchat"]),
    remove(
        3,
        13,
        &[
            "aifc", "cgi", "cgitb", "chunk", "crypt", "imghdr", "lib2to3", "mailcap", "nntplib",
            "pipes", "sndhdr", "sunau", "telnetlib", "uu", "xdrlib",
        ],
    ),
];

/// Ordered, duplicate-free list of module names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedModuleSet {
    names: Vec<String>,
}

impl ExpectedModuleSet {
    /// The Python 3.0 baseline.
    pub fn baseline() -> Self {
        let mut set = Self::default();
        for name in BASELINE {
            set.insert(name);
        }
        set
    }

    /// Build the full expected set for a runtime.
    ///
    /// `major_override` selects the Python 2 rename branch independently of
    /// `version`, for harnesses that pass the target major explicitly.
    pub fn for_version(
        version: &RuntimeVersion,
        major_override: Option<u32>,
        extra_excluded: &[String],
    ) -> Self {
        let mut set = Self::baseline();

        if major_override.unwrap_or(version.major) == 2 {
            set.apply_py2_renames();
        }

        for gate in GATES {
            if version.major_minor() >= gate.since {
                set.apply(gate);
            }
        }

        set.exclude(EXCLUDED.iter().copied());
        set.exclude(extra_excluded.iter().map(String::as_str));
        set
    }

    /// Append `name` unless already present.
    pub fn insert(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    /// Remove `name`; absent names are ignored.
    pub fn remove(&mut self, name: &str) {
        self.names.retain(|n| n != name);
    }

    /// Apply one gate unconditionally.
    pub fn apply(&mut self, gate: &VersionGate) {
        match gate.op {
            GateOp::Insert(names) => names.iter().for_each(|n| self.insert(n)),
            GateOp::Remove(names) => names.iter().for_each(|n| self.remove(n)),
        }
    }

    /// Replace Python 3 names with their Python 2 counterparts in place.
    pub fn apply_py2_renames(&mut self) {
        for (py3, py2) in PY2_RENAMES {
            if let Some(slot) = self.names.iter_mut().find(|n| n.as_str() == *py3) {
                *slot = py2.to_string();
            }
        }
    }

    /// Drop every name in `names`.
    pub fn exclude<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.remove(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Import every expected module and report the ones that fail.
///
/// `requested` is the optional version given on the command line; only its
/// major component is used, to pick the Python 2 branch.
pub fn check(
    runtime: &dyn Runtime,
    requested: Option<&RuntimeVersion>,
    extra_excluded: &[String],
) -> Result<CheckReport> {
    let mut report = CheckReport::new("modules");

    let version = runtime.facts()?.version.to_runtime_version();
    let expected =
        ExpectedModuleSet::for_version(&version, requested.map(|v| v.major), extra_excluded);
    report.info(format!(
        "Importing {} modules expected for {}.{}",
        expected.len(),
        version.major,
        version.minor
    ));

    let missing = runtime.import_failures(expected.names())?;
    if !missing.is_empty() {
        report.fail_with_details("The following modules are missing:", missing);
    }

    Ok(report)
}
