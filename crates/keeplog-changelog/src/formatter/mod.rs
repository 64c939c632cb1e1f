//! Changelog formatters

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::{render, render_changes, render_title, MarkdownFormatter};
pub use registry::FormatterRegistry;

use keeplog_core::Result;

use crate::types::{Changelog, Version};

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a whole changelog
    fn format(&self, changelog: &Changelog) -> Result<String>;

    /// Format the change lists of a single version
    fn format_version(&self, version: &Version) -> Result<String>;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
