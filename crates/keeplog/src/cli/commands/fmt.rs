//! Fmt command - rewrite the changelog in canonical form

use clap::Args;
use tracing::info;

use keeplog_changelog::parse_bytes;

use crate::cli::{output, Cli, OutputFormat};

/// Reformat the changelog
#[derive(Debug, Args)]
pub struct FmtCommand {
    /// Verify formatting without writing anything (for CI / hooks)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    /// Execute the fmt command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(check = self.check, format = ?cli.format, "executing fmt command");

        let config = cli.load_config()?;
        let source = cli.read_source(&config)?;
        let changelog = parse_bytes(&source);

        if self.check {
            if cli.format != OutputFormat::Text {
                anyhow::bail!("--check only supports the text format");
            }
            let rendered = cli.formatter()?.format(&changelog)?;
            if source != rendered.as_bytes() {
                anyhow::bail!(
                    "{} is not formatted, run `keeplog fmt`",
                    cli.input_path(&config).display()
                );
            }
            cli.report("Formatting check passed!");
            return Ok(());
        }

        if changelog.versions.is_empty() && !cli.quiet {
            output::warning("No versions found in the changelog");
        }
        cli.write_changelog(&changelog)
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::testing::Project;
    use pretty_assertions::assert_eq;

    const INPUT: &str = "# Changelog
All notable changes to this project will be documented in this file.

## [Unreleased]
### Changed
- Out of order entries
- Another item here
### Added
- Something else
## [0.1.0] - 2018-06-17
### Added
- Command A

[Unreleased]: https://github.com/example/changelog/compare/0.1.0...HEAD
[0.1.0]: https://github.com/example/changelog/compare/ae761ff...0.1.0";

    const FORMATTED: &str = "# Changelog

All notable changes to this project will be documented in this file.

## [Unreleased]
### Added
- Something else

### Changed
- Out of order entries
- Another item here

## [0.1.0] - 2018-06-17
### Added
- Command A

[Unreleased]: https://github.com/example/changelog/compare/0.1.0...HEAD
[0.1.0]: https://github.com/example/changelog/compare/ae761ff...0.1.0
";

    #[test]
    fn test_fmt() {
        let project = Project::new(INPUT);
        assert_eq!(project.run(&["fmt"]).unwrap(), FORMATTED);
    }

    #[test]
    fn test_fmt_json() {
        let project = Project::new(INPUT);
        let output = project.run(&["fmt", "--format", "json"]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["versions"][0]["name"], "Unreleased");
        assert_eq!(value["versions"][0]["changes"][0]["type"], "changed");
        assert_eq!(value["versions"][1]["date"], "2018-06-17");
        assert_eq!(value["versions"][1]["yanked"], false);
        assert_eq!(
            value["versions"][1]["changes"][0]["items"][0]["description"],
            "Command A"
        );
    }

    #[test]
    fn test_fmt_check() {
        let project = Project::new(INPUT);
        let err = project.run(&["fmt", "--check"]).unwrap_err();
        assert!(err.to_string().contains("is not formatted"));

        let project = Project::new(FORMATTED);
        assert!(project.run(&["fmt", "--check"]).is_ok());
    }

    #[test]
    fn test_fmt_missing_input() {
        let project = Project::new("");
        std::fs::remove_file(project.path("CHANGELOG.md")).unwrap();

        let err = project.run(&["fmt"]).unwrap_err();
        assert_eq!(crate::exit_codes::for_error(&err), crate::exit_codes::CONFIG_ERROR);
    }
}
