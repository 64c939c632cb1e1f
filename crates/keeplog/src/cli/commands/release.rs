//! Release command

use clap::Args;
use tracing::info;

use keeplog_changelog::ReleaseRequest;

use crate::cli::{output, Cli};

/// Release the Unreleased section as a new version
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Name of the new version
    #[arg(value_name = "VERSION")]
    pub name: String,

    /// Release date (default: today, formatted with `release.date_format`)
    #[arg(short = 'd', long = "release-date")]
    pub date: Option<String>,

    /// Compare URL for the new Unreleased section; `<prev>` and `<next>` tokens are substituted
    #[arg(short, long)]
    pub compare_url: Option<String>,

    /// Tag format used in compare links, e.g. `v{version}`
    #[arg(long)]
    pub tag_format: Option<String>,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = %self.name, "executing release command");

        let config = cli.load_config()?;
        let mut changelog = cli.read_changelog(&config)?;

        let date = self.date.clone().unwrap_or_else(|| {
            chrono::Local::now()
                .format(&config.release.date_format)
                .to_string()
        });
        let mut request = ReleaseRequest::new(&self.name)
            .with_date(date)
            .with_tag_format(
                self.tag_format
                    .as_deref()
                    .unwrap_or(&config.release.tag_format),
            );
        if let Some(template) = self.compare_url.as_ref().or(config.release.compare_url.as_ref()) {
            request = request.with_compare_url(template);
        }

        let released = changelog.release(&request)?;
        let message = format!(
            "Released {} ({})",
            output::version_style().apply_to(&released.name),
            released.date
        );

        cli.write_changelog(&changelog)?;
        if cli.verbose || cli.writes_file() {
            cli.report(&message);
        }
        Ok(())
    }
}
