//! JSON formatter

use keeplog_core::Result;

use super::ChangelogFormatter;
use crate::types::{Changelog, Version};

/// JSON changelog formatter, pretty printed with a trailing newline
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
        let mut output = serde_json::to_string_pretty(value)?;
        output.push('\n');
        Ok(output)
    }
}

impl ChangelogFormatter for JsonFormatter {
    fn format(&self, changelog: &Changelog) -> Result<String> {
        Self::to_json(changelog)
    }

    fn format_version(&self, version: &Version) -> Result<String> {
        Self::to_json(&version.changes)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
