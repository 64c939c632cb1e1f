//! Latest command

use clap::Args;
use tracing::info;

use keeplog_core::ChangelogError;

use crate::cli::{Cli, OutputFormat};

/// Print the latest released version
#[derive(Debug, Args)]
pub struct LatestCommand {}

impl LatestCommand {
    /// Execute the latest command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing latest command");

        let config = cli.load_config()?;
        let changelog = cli.read_changelog(&config)?;
        if changelog.versions.is_empty() {
            return Err(ChangelogError::NoVersions.into());
        }
        let latest = changelog
            .latest_release()
            .ok_or(ChangelogError::NoReleasedVersions)?;

        match cli.format {
            OutputFormat::Text => cli.write(&format!("{}\n", latest.name)),
            OutputFormat::Json => cli.write(&format!("{}\n", serde_json::to_string_pretty(latest)?)),
        }
    }
}
