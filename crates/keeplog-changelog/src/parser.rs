//! Keep a Changelog parser
//!
//! Walks the Markdown tree once and builds a [`Changelog`]. The parser is
//! permissive: headings and sections it does not recognise are dropped, it
//! never fails.
//!
//! - `#` starts capturing the preamble (everything up to the first `##`)
//! - `##` starts a version: `[name] - date [YANKED]`, the link of the name
//!   being the compare URL
//! - `###`/`####` starts a change list of one of the canonical types
//! - list items become entries of the current change list

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::markdown::{parse_document, Node, NodeKind, Visitor, WalkStatus};
use crate::types::{ChangeType, Changelog, Version};

/// Regex for version headings, applied to the trimmed heading text.
/// Only the start is anchored: trailing text such as a codename is ignored.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\[?(?P<name>[\w.\-]+)\]?(?: - (?P<date>[\w.\-]+))?(?P<yanked> \[YANKED\])?",
    )
    .expect("Invalid regex")
});

/// Parse a changelog document
#[instrument(skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Changelog {
    let document = parse_document(source);
    let mut reader = ChangelogReader::default();
    document.walk(&mut reader);
    let changelog = reader.finish();
    debug!(versions = changelog.versions.len(), "changelog parsed");
    changelog
}

/// Parse a changelog from raw bytes, replacing invalid UTF-8
pub fn parse_bytes(source: &[u8]) -> Changelog {
    parse(&String::from_utf8_lossy(source))
}

/// Parse the text of a version heading into a version without changes
pub fn parse_version_heading(title: &str) -> Option<Version> {
    let caps = VERSION_REGEX.captures(title.trim())?;
    let name = caps.name("name")?.as_str();

    Some(Version {
        name: name.to_string(),
        date: caps
            .name("date")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        yanked: caps.name("yanked").is_some(),
        ..Version::default()
    })
}

/// Cursor state for one parse
#[derive(Default)]
struct ChangelogReader {
    changelog: Changelog,
    /// Whether blocks are currently written to the preamble buffer
    capturing: bool,
    capture: String,
    /// Index of the version receiving change lists
    current_version: Option<usize>,
    /// Change list receiving items
    current_change: Option<ChangeType>,
}

impl ChangelogReader {
    fn finish(mut self) -> Changelog {
        // A changelog made only of a title and a paragraph
        self.flush_capture();
        self.changelog
    }

    fn start_capture(&mut self) {
        self.capturing = true;
        self.capture.clear();
    }

    fn flush_capture(&mut self) {
        if !self.capturing {
            return;
        }
        self.capturing = false;
        let content = self.capture.trim();
        if !content.is_empty() {
            self.changelog.preamble = content.to_string();
        }
        self.capture.clear();
    }

    fn heading(&mut self, node: &Node, level: u8) -> WalkStatus {
        match level {
            1 => self.start_capture(),
            2 => {
                self.flush_capture();
                self.version_heading(node);
            }
            3 | 4 => self.change_heading(node),
            _ if self.capturing => {
                self.capture.push_str(&"#".repeat(usize::from(level)));
                self.capture.push(' ');
                InlineWriter::new(&mut self.capture).children(&node.children);
                self.capture.push_str("\n\n");
            }
            _ => {}
        }
        WalkStatus::SkipChildren
    }

    fn version_heading(&mut self, node: &Node) {
        self.current_change = None;

        let mut title = String::new();
        let link = InlineWriter::new(&mut title).heading(&node.children);

        match parse_version_heading(&title) {
            Some(mut version) => {
                version.link = link.unwrap_or_default();
                debug!(name = %version.name, date = %version.date, yanked = version.yanked, "version heading");
                self.changelog.versions.push(version);
                self.current_version = Some(self.changelog.versions.len() - 1);
            }
            None => {
                debug!(%title, "heading is not a version, dropping section");
                self.current_version = None;
            }
        }
    }

    fn change_heading(&mut self, node: &Node) {
        let mut title = String::new();
        InlineWriter::new(&mut title).children(&node.children);

        let Some(idx) = self.current_version else {
            debug!(%title, "change heading outside of a version");
            self.current_change = None;
            return;
        };

        match title.parse::<ChangeType>() {
            Ok(change_type) => {
                self.changelog.versions[idx].change_list_or_insert(change_type);
                self.current_change = Some(change_type);
            }
            Err(()) => {
                debug!(%title, "unknown change type, dropping section");
                self.current_change = None;
            }
        }
    }

    fn list_item(&mut self, node: &Node) -> WalkStatus {
        if let (Some(idx), Some(change_type)) = (self.current_version, self.current_change) {
            let mut description = String::new();
            InlineWriter::new(&mut description).item(node, 0);

            self.changelog.versions[idx]
                .change_list_or_insert(change_type)
                .push(description.trim());
        }
        WalkStatus::SkipChildren
    }

    fn capture_block(&mut self, node: &Node) -> WalkStatus {
        let mut writer = InlineWriter::new(&mut self.capture);
        writer.node(node);
        if node.kind == NodeKind::Paragraph {
            self.capture.push_str("\n\n");
        }
        WalkStatus::SkipChildren
    }
}

impl Visitor for ChangelogReader {
    fn visit(&mut self, node: &Node, entering: bool) -> WalkStatus {
        if !entering {
            return WalkStatus::Continue;
        }

        match &node.kind {
            NodeKind::Document | NodeKind::List => WalkStatus::Continue,
            NodeKind::Heading(level) => self.heading(node, *level),
            NodeKind::Item => self.list_item(node),
            _ if self.capturing => self.capture_block(node),
            _ => WalkStatus::SkipChildren,
        }
    }
}

/// Renders inline content back to literal Markdown
struct InlineWriter<'a> {
    out: &'a mut String,
}

impl<'a> InlineWriter<'a> {
    fn new(out: &'a mut String) -> Self {
        Self { out }
    }

    fn children(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    /// Heading content; a link directly inside the heading renders as
    /// `[text]` and its destination is returned instead
    fn heading(&mut self, nodes: &[Node]) -> Option<String> {
        let mut link = None;
        for node in nodes {
            match &node.kind {
                NodeKind::Link { destination, .. } => {
                    self.out.push('[');
                    self.children(&node.children);
                    self.out.push(']');
                    link = Some(destination.clone());
                }
                _ => self.node(node),
            }
        }
        link
    }

    /// List item content; paragraphs are joined by newlines and nested
    /// lists become indented `- ` lines
    fn item(&mut self, item: &Node, depth: usize) {
        let mut first_block = true;
        for child in &item.children {
            match &child.kind {
                NodeKind::List => {
                    for nested in &child.children {
                        self.out.push('\n');
                        self.out.push_str(&"  ".repeat(depth));
                        self.out.push_str("- ");
                        self.item(nested, depth + 1);
                    }
                }
                NodeKind::Paragraph => {
                    if !first_block {
                        self.out.push('\n');
                    }
                    self.children(&child.children);
                    first_block = false;
                }
                _ => {
                    self.node(child);
                    first_block = false;
                }
            }
        }
    }

    fn node(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Text(text) | NodeKind::Html(text) => self.out.push_str(text),
            NodeKind::Code(code) => {
                self.out.push('`');
                self.out.push_str(code);
                self.out.push('`');
            }
            NodeKind::SoftBreak | NodeKind::HardBreak => self.out.push('\n'),
            NodeKind::Emphasis => self.wrap("_", &node.children),
            NodeKind::Strong => self.wrap("**", &node.children),
            NodeKind::Strikethrough => self.wrap("~~", &node.children),
            NodeKind::Link {
                destination,
                autolink: true,
            } => {
                self.out.push('<');
                self.out.push_str(destination);
                self.out.push('>');
            }
            NodeKind::Link { destination, .. } => {
                self.out.push('[');
                self.children(&node.children);
                self.out.push_str("](");
                self.out.push_str(destination);
                self.out.push(')');
            }
            NodeKind::Image { destination } => {
                self.out.push_str("![");
                self.children(&node.children);
                self.out.push_str("](");
                self.out.push_str(destination);
                self.out.push(')');
            }
            NodeKind::Item => self.item(node, 0),
            _ => self.children(&node.children),
        }
    }

    fn wrap(&mut self, marker: &str, children: &[Node]) {
        self.out.push_str(marker);
        self.children(children);
        self.out.push_str(marker);
    }
}
