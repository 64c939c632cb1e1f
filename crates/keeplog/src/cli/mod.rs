//! CLI definition and command handling

pub mod commands;
pub mod io;
pub mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use keeplog_changelog::{parse_bytes, ChangeType, Changelog, ChangelogFormatter, FormatterRegistry};
use keeplog_core::config::load_config;
use keeplog_core::{load_config_or_default, Config};

use commands::{
    BundleCommand, CompletionsCommand, EntryCommand, FmtCommand, InitCommand, LatestCommand,
    ReleaseCommand, ShowCommand,
};

/// keeplog - Keep a Changelog maintenance CLI
#[derive(Debug, Parser)]
#[command(name = "keeplog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Changelog file to read, `-` for stdin (default: configured file)
    #[arg(short = 'f', long, global = true)]
    pub filename: Option<PathBuf>,

    /// Where to write the result, `-` for stdout
    #[arg(short, long, global = true, default_value = io::STDIO)]
    pub output: PathBuf,

    /// Configuration file (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Canonical Markdown
    #[default]
    Text,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Extension of the matching changelog formatter
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "md",
            Self::Json => "json",
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a new changelog skeleton
    Init(InitCommand),

    /// Reformat the changelog into its canonical form
    Fmt(FmtCommand),

    /// Show the changes of a version
    Show(ShowCommand),

    /// Print the latest released version
    Latest(LatestCommand),

    /// Add an "Added" entry to Unreleased
    Added(EntryCommand),

    /// Add a "Changed" entry to Unreleased
    Changed(EntryCommand),

    /// Add a "Deprecated" entry to Unreleased
    Deprecated(EntryCommand),

    /// Add a "Fixed" entry to Unreleased
    Fixed(EntryCommand),

    /// Add a "Removed" entry to Unreleased
    Removed(EntryCommand),

    /// Add a "Security" entry to Unreleased
    Security(EntryCommand),

    /// Release the Unreleased section as a new version
    Release(ReleaseCommand),

    /// Bundle fragment files into Unreleased
    Bundle(BundleCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.chdir {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Fmt(ref cmd) => cmd.execute(&self),
            Commands::Show(ref cmd) => cmd.execute(&self),
            Commands::Latest(ref cmd) => cmd.execute(&self),
            Commands::Added(ref cmd) => cmd.execute(&self, ChangeType::Added),
            Commands::Changed(ref cmd) => cmd.execute(&self, ChangeType::Changed),
            Commands::Deprecated(ref cmd) => cmd.execute(&self, ChangeType::Deprecated),
            Commands::Fixed(ref cmd) => cmd.execute(&self, ChangeType::Fixed),
            Commands::Removed(ref cmd) => cmd.execute(&self, ChangeType::Removed),
            Commands::Security(ref cmd) => cmd.execute(&self, ChangeType::Security),
            Commands::Release(ref cmd) => cmd.execute(&self),
            Commands::Bundle(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the explicit configuration file, or discover one from the
    /// working directory
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(path) = &self.config {
            return Ok(load_config(path)?);
        }
        let cwd = std::env::current_dir()?;
        let (config, path) = load_config_or_default(&cwd);
        debug!(config = ?path, "configuration loaded");
        Ok(config)
    }

    /// Changelog file to read
    pub fn input_path(&self, config: &Config) -> PathBuf {
        self.filename
            .clone()
            .unwrap_or_else(|| config.changelog.file.clone())
    }

    /// Read the raw input changelog
    pub fn read_source(&self, config: &Config) -> anyhow::Result<Vec<u8>> {
        let path = self.input_path(config);
        io::read_input(&path)
            .with_context(|| format!("Failed to read changelog from {}", path.display()))
    }

    /// Read and parse the input changelog
    pub fn read_changelog(&self, config: &Config) -> anyhow::Result<Changelog> {
        Ok(parse_bytes(&self.read_source(config)?))
    }

    /// Formatter selected by `--format`
    pub fn formatter(&self) -> anyhow::Result<Arc<dyn ChangelogFormatter>> {
        let extension = self.format.extension();
        let registry = FormatterRegistry::new();
        registry.get(extension).ok_or_else(|| {
            anyhow::anyhow!(
                "No formatter for '{}' (available: {})",
                extension,
                registry.extensions().join(", ")
            )
        })
    }

    /// Render the whole changelog to the output
    pub fn write_changelog(&self, changelog: &Changelog) -> anyhow::Result<()> {
        let rendered = self.formatter()?.format(changelog)?;
        self.write(&rendered)
    }

    /// Write raw text to the output
    pub fn write(&self, content: &str) -> anyhow::Result<()> {
        io::write_output(&self.output, content.as_bytes())
            .with_context(|| format!("Failed to write {}", self.output.display()))
    }

    /// Whether the output goes to a file rather than stdout
    pub fn writes_file(&self) -> bool {
        !io::is_stdio(&self.output)
    }

    /// Print a success message unless quiet
    pub fn report(&self, message: &str) {
        if !self.quiet {
            output::success(message);
        }
    }
}

/// Show a path in the path style
pub fn styled_path(path: &Path) -> String {
    output::path_style().apply_to(path.display()).to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::fs;
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use tempfile::TempDir;

    use super::Cli;

    /// A temporary project with a changelog and an output file
    pub struct Project {
        pub dir: TempDir,
    }

    impl Project {
        pub fn new(changelog: &str) -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("CHANGELOG.md"), changelog).unwrap();
            Self { dir }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        /// Run keeplog reading CHANGELOG.md and writing out.md
        pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
            let input = self.path("CHANGELOG.md");
            let output = self.path("out.md");
            let mut full = vec![
                "keeplog".to_string(),
                "-q".to_string(),
                "-f".to_string(),
                display(&input),
                "-o".to_string(),
                display(&output),
            ];
            full.extend(args.iter().map(|a| a.to_string()));

            Cli::try_parse_from(full)?.execute()?;
            Ok(fs::read_to_string(output).unwrap_or_default())
        }
    }

    fn display(path: &Path) -> String {
        path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["keeplog", "show", "1.0.0", "-f", "-", "--format", "json"])
            .unwrap();
        assert_eq!(cli.filename, Some(PathBuf::from("-")));
        assert_eq!(cli.output, PathBuf::from("-"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.writes_file());
    }

    #[test]
    fn test_input_path_defaults_to_config() {
        let cli = Cli::try_parse_from(["keeplog", "fmt"]).unwrap();
        let config = Config::default();
        assert_eq!(cli.input_path(&config), PathBuf::from("CHANGELOG.md"));
    }

    #[test]
    fn test_bundle_directory_is_not_the_working_directory() {
        let cli = Cli::try_parse_from(["keeplog", "bundle", "-d", "frag"]).unwrap();
        assert_eq!(cli.chdir, None);
        match cli.command {
            Commands::Bundle(cmd) => assert_eq!(cmd.directory, Some(PathBuf::from("frag"))),
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["keeplog", "-C", "project", "bundle"]).unwrap();
        assert_eq!(cli.chdir, Some(PathBuf::from("project")));
    }

    #[test]
    fn test_formatter_follows_format_flag() {
        let cli = Cli::try_parse_from(["keeplog", "--format", "json", "fmt"]).unwrap();
        assert_eq!(cli.formatter().unwrap().extension(), "json");
    }

    #[test]
    fn test_entry_requires_text() {
        assert!(Cli::try_parse_from(["keeplog", "added"]).is_err());
    }
}
