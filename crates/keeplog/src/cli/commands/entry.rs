//! Entry commands - add an item to the Unreleased section

use clap::Args;
use tracing::info;

use keeplog_changelog::ChangeType;

use crate::cli::Cli;

/// Add an entry of one change type
#[derive(Debug, Args)]
pub struct EntryCommand {
    /// Entry text; words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl EntryCommand {
    /// Execute the entry command for the given change type
    pub fn execute(&self, cli: &Cli, change_type: ChangeType) -> anyhow::Result<()> {
        let text = self.text.join(" ");
        info!(%change_type, text = %text, "executing entry command");

        let config = cli.load_config()?;
        let mut changelog = cli.read_changelog(&config)?;
        changelog.add_item(change_type, text);
        cli.write_changelog(&changelog)?;

        if cli.writes_file() {
            cli.report(&format!("Added a {} entry", change_type));
        }
        Ok(())
    }
}
