//! Canonical Markdown renderer
//!
//! The output is the fixed point of the parser: parsing it and rendering
//! again yields the same text.

use keeplog_core::Result;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ChangeList, ChangeType, Changelog, Version};

/// Markdown changelog formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn format(&self, changelog: &Changelog) -> Result<String> {
        Ok(render(changelog))
    }

    fn format_version(&self, version: &Version) -> Result<String> {
        let mut output = String::new();
        render_changes(&mut output, version);
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// Render a changelog as canonical Markdown
#[instrument(skip(changelog), fields(versions = changelog.versions.len()))]
pub fn render(changelog: &Changelog) -> String {
    let mut output = String::from("# Changelog\n");

    let preamble = changelog.preamble.trim();
    if !preamble.is_empty() {
        output.push('\n');
        output.push_str(preamble);
        output.push('\n');
    }

    for version in &changelog.versions {
        output.push('\n');
        render_title(&mut output, version);
        output.push('\n');
        render_changes(&mut output, version);
    }

    let mut links = String::new();
    for version in changelog.versions.iter().filter(|v| !v.link.is_empty()) {
        links.push_str(&format!("[{}]: {}\n", version.name, version.link));
    }
    if !links.is_empty() {
        output.push('\n');
        output.push_str(&links);
    }

    debug!(output_len = output.len(), "markdown changelog rendered");
    output
}

/// Render a version heading, without the trailing newline
pub fn render_title(output: &mut String, version: &Version) {
    output.push_str("## ");
    if version.link.is_empty() {
        output.push_str(&version.name);
    } else {
        output.push('[');
        output.push_str(&version.name);
        output.push(']');
    }
    if !version.date.is_empty() {
        output.push_str(" - ");
        output.push_str(&version.date);
    }
    if version.yanked {
        output.push_str(" [YANKED]");
    }
}

/// Render the change lists of a version in change type order
pub fn render_changes(output: &mut String, version: &Version) {
    let mut changes: Vec<&ChangeList> = version
        .changes
        .iter()
        .filter(|c| c.change_type != ChangeType::Unknown)
        .collect();
    changes.sort_by_key(|c| c.change_type);

    for (i, change) in changes.into_iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("### {}\n", change.change_type));
        for item in &change.items {
            output.push_str("- ");
            // Continuation lines stay inside the list item
            output.push_str(&item.description.replace('\n', "\n  "));
            output.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::Item;
    use pretty_assertions::assert_eq;

    fn list(change_type: ChangeType, items: &[&str]) -> ChangeList {
        ChangeList {
            change_type,
            items: items.iter().map(|i| Item::new(*i)).collect(),
        }
    }

    fn title(version: &Version) -> String {
        let mut output = String::new();
        render_title(&mut output, version);
        output
    }

    #[test]
    fn test_render_title() {
        assert_eq!(title(&Version::new("1.0.0")), "## 1.0.0");
        assert_eq!(
            title(&Version::new("1.0.0").with_date("2018-05-24")),
            "## 1.0.0 - 2018-05-24"
        );
        assert_eq!(
            title(&Version::new("1.0.0").with_link("http://example.com/")),
            "## [1.0.0]"
        );
        assert_eq!(title(&Version::new("1.0.0").yanked()), "## 1.0.0 [YANKED]");
    }

    #[test]
    fn test_render_preamble_only() {
        let changelog = Changelog {
            preamble: "Any paragraph\nto be inserted.\n".to_string(),
            versions: Vec::new(),
        };
        assert_eq!(render(&changelog), "# Changelog\n\nAny paragraph\nto be inserted.\n");
    }

    #[test]
    fn test_render_empty_changelog() {
        assert_eq!(render(&Changelog::new()), "# Changelog\n");
    }

    #[test]
    fn test_render_versions_without_changes() {
        let changelog = Changelog {
            preamble: "Any paragraph\nto be inserted.".to_string(),
            versions: vec![Version::new("1.0.0"), Version::new("2.0.0")],
        };
        assert_eq!(
            render(&changelog),
            "# Changelog\n\nAny paragraph\nto be inserted.\n\n## 1.0.0\n\n## 2.0.0\n"
        );
    }

    #[test]
    fn test_render_sorts_change_lists() {
        let mut version = Version::new("1.0.0");
        version.changes = vec![
            list(ChangeType::Removed, &["r"]),
            list(ChangeType::Added, &["a"]),
            list(ChangeType::Fixed, &["f"]),
            list(ChangeType::Changed, &["c"]),
            list(ChangeType::Security, &["s"]),
            list(ChangeType::Deprecated, &["d"]),
        ];
        let changelog = Changelog {
            preamble: String::new(),
            versions: vec![version],
        };

        let output = render(&changelog);
        let headings: Vec<_> = output.lines().filter(|l| l.starts_with("### ")).collect();
        assert_eq!(
            headings,
            vec![
                "### Added",
                "### Changed",
                "### Deprecated",
                "### Fixed",
                "### Removed",
                "### Security"
            ]
        );
        // Sorting happens at render time only
        assert_eq!(changelog.versions[0].changes[0].change_type, ChangeType::Removed);
    }

    #[test]
    fn test_render_empty_lists() {
        let mut version = Version::new("1.0.0");
        version.changes = vec![list(ChangeType::Fixed, &[]), list(ChangeType::Added, &[])];
        let changelog = Changelog {
            preamble: "Any paragraph".to_string(),
            versions: vec![version],
        };
        assert_eq!(
            render(&changelog),
            "# Changelog\n\nAny paragraph\n\n## 1.0.0\n### Added\n\n### Fixed\n"
        );
    }

    #[test]
    fn test_render_changes() {
        let mut version = Version::new("1.0.0");
        version.changes = vec![
            list(ChangeType::Added, &["Item 1", "Item 2"]),
            list(ChangeType::Changed, &["Item A", "Item B"]),
        ];
        let output = MarkdownFormatter::new().format_version(&version).unwrap();
        assert_eq!(
            output,
            "### Added\n- Item 1\n- Item 2\n\n### Changed\n- Item A\n- Item B\n"
        );
    }

    #[test]
    fn test_render_links_only_for_linked_versions() {
        let changelog = Changelog {
            preamble: String::new(),
            versions: vec![
                Version::new("Unreleased").with_link("http://example.com/unreleased"),
                Version::new("1.2.3").with_link("http://example.com/1.2.3"),
                Version::new("4.5.6"),
            ],
        };
        let output = render(&changelog);
        assert!(output.ends_with(
            "## 4.5.6\n\n[Unreleased]: http://example.com/unreleased\n[1.2.3]: http://example.com/1.2.3\n"
        ));
    }

    #[test]
    fn test_render_skips_unknown_lists() {
        let mut version = Version::new("1.0.0");
        version.changes = vec![list(ChangeType::Unknown, &["x"])];
        let changelog = Changelog {
            preamble: String::new(),
            versions: vec![version],
        };
        assert_eq!(render(&changelog), "# Changelog\n\n## 1.0.0\n");
    }

    #[test]
    fn test_fmt_reorders_document() {
        let input = "# Changelog
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
- Command B

[Unreleased]: https://github.com/example/changelog/compare/0.2.0...HEAD
[0.1.0]: https://github.com/example/changelog/compare/ae761ff...0.1.0";

        let expected = "# Changelog

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
- Command B

[Unreleased]: https://github.com/example/changelog/compare/0.2.0...HEAD
[0.1.0]: https://github.com/example/changelog/compare/ae761ff...0.1.0
";
        assert_eq!(render(&parse(input)), expected);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut changelog = Changelog::with_defaults("https://example.com/abcdef...HEAD");
        changelog.add_item(ChangeType::Security, "Patch **CVE** in `eval`");
        changelog.add_item(ChangeType::Changed, "Multi-line\nentry with [link](https://x.y)");
        changelog.add_item(ChangeType::Fixed, "parent\n- child\n  - grandchild");
        changelog.versions.push(
            Version::new("0.1.0")
                .with_date("2020-01-01")
                .with_link("https://example.com/0.0.1...0.1.0")
                .yanked(),
        );
        changelog.versions.push(Version::new("0.0.1").with_date("2019-12-01"));

        let once = render(&changelog);
        let reparsed = parse(&once);
        assert_eq!(render(&reparsed), once);

        let unreleased = reparsed.version("unreleased").unwrap();
        assert_eq!(
            unreleased.change_list(ChangeType::Changed).unwrap().items[0].description,
            "Multi-line\nentry with [link](https://x.y)"
        );
        assert_eq!(
            unreleased.change_list(ChangeType::Fixed).unwrap().items[0].description,
            "parent\n- child\n  - grandchild"
        );
    }
}
