//! Bundle command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use keeplog_changelog::{bundle_dir, bundle_files_in};

use crate::cli::{output, styled_path, Cli};

/// Bundle fragment files into the Unreleased section
#[derive(Debug, Args)]
pub struct BundleCommand {
    /// Directory holding `<type>/*.md` fragments (default: `bundle.directory`)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

impl BundleCommand {
    /// Execute the bundle command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = cli.load_config()?;
        let directory = self
            .directory
            .clone()
            .unwrap_or_else(|| config.bundle.directory.clone());
        info!(directory = %directory.display(), "executing bundle command");

        if cli.verbose && !cli.quiet {
            for (change_type, path) in bundle_files_in(&directory)? {
                output::info(&format!("{}: {}", change_type, styled_path(&path)));
            }
        }

        let mut changelog = cli.read_changelog(&config)?;
        let summary = bundle_dir(&directory, &mut changelog)?;
        cli.write_changelog(&changelog)?;

        cli.report(&format!(
            "Bundled {} entries from {} files in {}",
            summary.items,
            summary.files,
            styled_path(&directory)
        ));
        Ok(())
    }
}
