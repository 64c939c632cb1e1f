//! Show command

use clap::Args;
use tracing::info;

use keeplog_core::ChangelogError;

use crate::cli::Cli;

/// Show the changes of a version
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Version to show (case-insensitive)
    #[arg(value_name = "VERSION")]
    pub name: String,
}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = %self.name, "executing show command");

        let config = cli.load_config()?;
        let changelog = cli.read_changelog(&config)?;
        let version = changelog
            .version(&self.name)
            .ok_or_else(|| ChangelogError::VersionNotFound(self.name.clone()))?;

        cli.write(&cli.formatter()?.format_version(version)?)
    }
}
