//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_release(config)?;
    validate_bundle(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "file cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_release(config: &Config) -> Result<()> {
    if !config.release.tag_format.contains("{version}") {
        return Err(ConfigError::InvalidValue {
            field: "release.tag_format".to_string(),
            message: "must contain {version} placeholder".to_string(),
        }
        .into());
    }

    if let Some(url) = &config.release.compare_url {
        if url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "release.compare_url".to_string(),
                message: "compare URL cannot be empty when set".to_string(),
            }
            .into());
        }
    }

    if config.release.date_format.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "release.date_format".to_string(),
            message: "date format cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_bundle(config: &Config) -> Result<()> {
    if config.bundle.directory.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "bundle.directory".to_string(),
            message: "directory cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}
