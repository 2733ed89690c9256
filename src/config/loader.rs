//! Settings file discovery and loading.

use crate::config::schema::Settings;
use crate::error::{Result, VerifyError};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = ".pyverify.yml";

/// Find the settings file to load.
///
/// An explicit path (from `--config` or `PYVERIFY_CONFIG`) is returned as-is
/// even if it does not exist, so that loading reports it. Otherwise
/// `.pyverify.yml` in `cwd` is used when present.
pub fn find_settings_file(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let path = cwd.join(DEFAULT_SETTINGS_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load settings, falling back to defaults when no file is found.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<Settings> {
    match find_settings_file(explicit, cwd) {
        Some(path) => {
            tracing::debug!("Loading settings from {}", path.display());
            load_settings_file(&path)
        }
        None => Ok(Settings::default()),
    }
}

/// Load and parse a single settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VerifyError::SettingsNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VerifyError::Io(e)
        }
    })?;

    parse_settings(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// A file holding only comments or whitespace yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Option<Settings> =
        serde_yaml::from_str(content).map_err(|e| VerifyError::SettingsParse {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(settings.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(None, temp.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn discovers_file_in_working_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_SETTINGS_FILE),
            "modules:\n  exclude: [tkinter]\n",
        )
        .unwrap();

        assert_eq!(
            find_settings_file(None, temp.path()),
            Some(temp.path().join(DEFAULT_SETTINGS_FILE))
        );
        let settings = load_settings(None, temp.path()).unwrap();
        assert_eq!(settings.modules.exclude, vec!["tkinter"]);
    }

    #[test]
    fn explicit_path_wins_over_working_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_SETTINGS_FILE),
            "fetch:\n  expected_length: 1\n",
        )
        .unwrap();
        let explicit = temp.path().join("ci.yml");
        fs::write(&explicit, "fetch:\n  expected_length: 2\n").unwrap();

        let settings = load_settings(Some(&explicit), temp.path()).unwrap();
        assert_eq!(settings.fetch.expected_length, Some(2));
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_settings(Some(&missing), temp.path()).unwrap_err();
        assert!(matches!(err, VerifyError::SettingsNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_settings("fetch: [unclosed", Path::new("bad.yml")).unwrap_err();
        match err {
            VerifyError::SettingsParse { path, .. } => assert_eq!(path, Path::new("bad.yml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = parse_settings("dist-info:\n  roots: []\n", Path::new("x.yml")).unwrap_err();
        assert!(err.to_string().contains("dist-info"));
    }

    #[test]
    fn comment_only_file_yields_defaults() {
        let settings = parse_settings("# nothing here\n", Path::new("x.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
