//! Exit codes for the CLI

use keeplog_core::{ChangelogError, ConfigError, KeeplogError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration or input error
pub const CONFIG_ERROR: u8 = 2;

/// Release or version lookup error
pub const VERSION_ERROR: u8 = 3;

/// Map a command error to the process exit code
pub fn for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<ChangelogError>() {
            return for_changelog_error(err);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
        if let Some(err) = cause.downcast_ref::<KeeplogError>() {
            return match err {
                KeeplogError::Config(_) => CONFIG_ERROR,
                KeeplogError::Changelog(err) => for_changelog_error(err),
                KeeplogError::Io(_) => CONFIG_ERROR,
                KeeplogError::Json(_) => ERROR,
            };
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return CONFIG_ERROR;
        }
    }
    ERROR
}

fn for_changelog_error(err: &ChangelogError) -> u8 {
    match err {
        ChangelogError::Io(_) | ChangelogError::FragmentDirNotFound(_) => CONFIG_ERROR,
        _ => VERSION_ERROR,
    }
}
