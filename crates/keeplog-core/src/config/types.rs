//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for keeplog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog file configuration
    pub changelog: ChangelogConfig,

    /// Release configuration
    pub release: ReleaseConfig,

    /// Fragment bundling configuration
    pub bundle: BundleConfig,
}

/// Changelog file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
        }
    }
}

/// Release configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Tag format used in compare links (e.g., "v{version}")
    pub tag_format: String,

    /// Compare URL template for the new Unreleased section.
    /// `<prev>` is replaced by the released tag, `<next>` by `HEAD`.
    pub compare_url: Option<String>,

    /// strftime format for the default release date
    pub date_format: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            tag_format: "{version}".to_string(),
            compare_url: None,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Fragment bundling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Directory holding `<type>/<file>.md` fragments
    pub directory: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("changelog-unreleased"),
        }
    }
}
