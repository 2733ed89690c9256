//! Integration tests for the check APIs, driven through `StaticRuntime`.

use pyverify::checks::build_config::{
    self, installer_lib_dir, tools_lib_dir, ConfigExpectation, ConfigRequest, Profile,
};
use pyverify::checks::stdlib::{self, ExpectedModuleSet, GATES};
use pyverify::checks::{dist_info, fetch, sqlite};
use pyverify::runtime::{DatabaseTarget, RuntimeVersion, StaticRuntime, UrlopenReport};
use std::fs;
use tempfile::TempDir;

const TOOLS: &str = "/Users/runner/hostedtoolcache";

fn request(version: &str, native: Option<&str>) -> ConfigRequest {
    ConfigRequest {
        version: version.to_string(),
        native_version: native.map(String::from),
        profile: Profile::implied(native.is_some()),
        tools_directory: Some(TOOLS.to_string()),
        os: None,
    }
}

#[test]
fn linux_3_12_module_set() {
    let version = RuntimeVersion::parse("3.12.1").unwrap();
    let set = ExpectedModuleSet::for_version(&version, None, &[]);

    for removed in ["distutils", "imp", "smtpd", "asyncore", "asynchat"] {
        assert!(!set.contains(removed), "{removed} should be gone in 3.12");
    }
    for present in ["typing", "contextvars", "tomllib", "_ssl"] {
        assert!(set.contains(present), "{present} should exist in 3.12");
    }
    for excluded in ["antigravity", "this", "turtledemo"] {
        assert!(!set.contains(excluded));
    }
}

#[test]
fn reapplying_gates_changes_nothing() {
    let version = RuntimeVersion::parse("3.13.0").unwrap();
    let mut set = ExpectedModuleSet::for_version(&version, None, &[]);
    let before = set.names().to_vec();

    for gate in GATES {
        if version.major_minor() >= gate.since {
            set.apply(gate);
        }
    }

    assert_eq!(set.names(), before.as_slice());
}

#[test]
fn python2_branch_uses_old_names() {
    let runtime = StaticRuntime::linux("2.7.18");
    let requested = RuntimeVersion::parse("2.7").unwrap();
    let report = stdlib::check(&runtime, Some(&requested), &[]).unwrap();

    assert!(report.passed());
    let imported = runtime.imported();
    assert!(imported.contains(&"ConfigParser".to_string()));
    assert!(!imported.contains(&"configparser".to_string()));
}

#[test]
fn expected_library_path_is_deterministic() {
    let a = ConfigExpectation::derive("Linux", &request("3.10.13", None)).unwrap();
    let b = ConfigExpectation::derive("Linux", &request("3.10.13", None)).unwrap();
    assert_eq!(a.lib_dir, b.lib_dir);
    assert_eq!(a.lib_dir, tools_lib_dir(TOOLS, "3.10.13"));
}

#[test]
fn linux_shared_so_passes_and_dylib_fails() {
    let healthy = StaticRuntime::linux("3.11.7")
        .with_config_var("LIBDIR", tools_lib_dir(TOOLS, "3.11.7"))
        .with_config_var("LDLIBRARY", "libpython3.11.so")
        .with_config_var("Py_ENABLE_SHARED", 1)
        .with_config_var("HAVE_LIBREADLINE", 1);
    assert!(build_config::check(&healthy, &request("3.11.7", None))
        .unwrap()
        .passed());

    let wrong = healthy.with_config_var("LDLIBRARY", "libpython3.11.dylib");
    let report = build_config::check(&wrong, &request("3.11.7", None)).unwrap();
    assert_eq!(report.failures(), vec!["Invalid extension: dylib; Expected so"]);
}

#[test]
fn darwin_installer_static_build_only_warns() {
    let runtime = StaticRuntime::darwin("3.12.1")
        .with_config_var("LIBDIR", installer_lib_dir(3, 12))
        .with_config_var("LDLIBRARY", "Python.framework/Versions/3.12/Python")
        .with_config_var("Py_ENABLE_SHARED", 0)
        .with_config_var("HAVE_LIBREADLINE", 1);

    let report = build_config::check(&runtime, &request("3.12.1", Some("3.12.1"))).unwrap();

    assert!(report.passed(), "{:?}", report.failures());
    assert!(!report.warnings().is_empty());
}

#[test]
fn dist_info_check_over_synthetic_roots() {
    let root = TempDir::new().unwrap();
    for dir in ["pip-23.3.1.dist-info", "pip-24.0.dist-info", "wheel-0.42.0.dist-info"] {
        fs::create_dir_all(root.path().join(dir)).unwrap();
    }

    let report = dist_info::check(&[root.path()]).unwrap();
    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("multiple dist-info found for pip: ["));
}

#[test]
fn sqlite_check_through_runtime() {
    let runtime = StaticRuntime::linux("3.12.1");
    let report = sqlite::check(&runtime, &DatabaseTarget::InMemory, false).unwrap();
    assert!(report.passed());
}

#[test]
fn pinned_fetch_requires_140_bytes() {
    for (length, passes) in [(140, true), (139, false), (0, false)] {
        let runtime = StaticRuntime::linux("3.12.1").with_urlopen(UrlopenReport {
            status: Some(200),
            length: Some(length),
            sha256: Some("00".repeat(32)),
            error: None,
        });
        let fetcher = fetch::InterpreterFetcher::new(&runtime);
        let report = fetch::check(&fetcher, &fetch::FetchExpectation::default()).unwrap();
        assert_eq!(report.passed(), passes, "length {length}");
    }
}
