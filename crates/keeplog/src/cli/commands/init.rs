//! Init command

use std::fs;

use clap::Args;
use tracing::info;

use keeplog_changelog::Changelog;
use keeplog_core::config::{default_config_toml, DEFAULT_CONFIG_TOML};

use crate::cli::{styled_path, Cli};

/// Compare link of the Unreleased section in a fresh changelog
pub const DEFAULT_COMPARE_URL: &str = "https://github.com/owner/repo/compare/abcdef...HEAD";

/// Print a new changelog skeleton
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Compare link of the Unreleased section
    #[arg(short, long, default_value = DEFAULT_COMPARE_URL)]
    pub compare_url: String,

    /// Also write a default keeplog.toml to the working directory
    #[arg(long)]
    pub with_config: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            compare_url = %self.compare_url,
            with_config = self.with_config,
            "executing init command"
        );

        if cli.writes_file() && cli.output.exists() && !self.force {
            anyhow::bail!(
                "Changelog already exists at {}. Use --force to overwrite.",
                cli.output.display()
            );
        }

        if self.with_config {
            let config_path = std::env::current_dir()?.join(DEFAULT_CONFIG_TOML);
            if config_path.exists() && !self.force {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }
            fs::write(&config_path, default_config_toml())?;
            cli.report(&format!("Created {}", styled_path(&config_path)));
        }

        let changelog = Changelog::with_defaults(&self.compare_url);
        cli.write_changelog(&changelog)?;

        if cli.writes_file() {
            cli.report(&format!("Created {}", styled_path(&cli.output)));
        }
        Ok(())
    }
}
