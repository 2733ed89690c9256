//! Settings file schema.
//!
//! Every section is optional; an empty file is a valid settings file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of a `.pyverify.yml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Duplicate dist-info detector settings
    pub dist_info: DistInfoSettings,

    /// Build/config validator settings
    pub config: BuildConfigSettings,

    /// Standard-library completeness settings
    pub modules: ModulesSettings,

    /// Fetch integrity settings
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistInfoSettings {
    /// Installation roots to scan instead of asking the interpreter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfigSettings {
    /// Fallback for `AGENT_TOOLSDIRECTORY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_directory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesSettings {
    /// Extra module names that are never imported
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_length: Option<usize>,

    /// Hex SHA-256 the body must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_sha256: Option<String>,
}
