//! Optional YAML settings for pyverify.
//!
//! Settings supply defaults that would otherwise have to be repeated on
//! every invocation in a CI job: fixed installation roots, the tools
//! directory, extra module exclusions and fetch overrides. Command-line
//! flags always win over the file.
//!
//! # Example
//!
//! ```
//! use pyverify::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".pyverify.yml"), "modules:\n  exclude: [tkinter]\n").unwrap();
//!
//! let settings = load_settings(None, temp.path()).unwrap();
//! assert_eq!(settings.modules.exclude, vec!["tkinter".to_string()]);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_settings_file, load_settings, load_settings_file, parse_settings, DEFAULT_SETTINGS_FILE,
};
pub use schema::{BuildConfigSettings, DistInfoSettings, FetchSettings, ModulesSettings, Settings};
