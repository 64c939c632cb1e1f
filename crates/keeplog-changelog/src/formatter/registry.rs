//! Formatter registry

use std::sync::Arc;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter};

/// Registry of available changelog formatters, keyed by extension
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with the Markdown and JSON formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new()),
                Arc::new(JsonFormatter::new()),
            ],
        }
    }

    /// Get formatter by file extension
    pub fn get(&self, extension: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.extension() == extension)
            .cloned()
    }

    /// Get all supported file extensions
    pub fn extensions(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.extension()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_extension() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.get("md").unwrap().extension(), "md");
        assert_eq!(registry.get("json").unwrap().extension(), "json");
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_extensions() {
        let registry = FormatterRegistry::default();
        assert_eq!(registry.extensions(), vec!["md", "json"]);
    }
}
